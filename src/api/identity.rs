//! Resource identities and endpoint URL composition.

use crate::config::ReleaseMode;
use std::fmt;

/// The (app label, model name) pair that scopes a family of records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub app_label: String,
    pub model_name: String,
}

impl ModelKey {
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model_name: model_name.into(),
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app_label, self.model_name)
    }
}

/// The record being edited. Immutable once a form is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub model: ModelKey,
    pub object_id: String,
}

impl ResourceIdentity {
    pub fn new(
        app_label: impl Into<String>,
        model_name: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        Self {
            model: ModelKey::new(app_label, model_name),
            object_id: object_id.into(),
        }
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.model, self.object_id)
    }
}

/// Where the lock API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Scheme and host, or `None` for a relative endpoint.
    pub host_url: Option<String>,
    /// Path of the lock API below the host.
    pub api_base_url: String,
    /// Explicit endpoint replacing the base URL and identity segments.
    pub api_url: Option<String>,
    pub release_mode: ReleaseMode,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host_url: None,
            api_base_url: "/locking/api/lock".to_string(),
            api_url: None,
            release_mode: ReleaseMode::Delete,
        }
    }
}

impl EndpointConfig {
    /// Endpoint for a single record.
    pub fn resource_url(&self, identity: &ResourceIdentity) -> String {
        self.url_for(&[
            &identity.model.app_label,
            &identity.model.model_name,
            &identity.object_id,
        ])
    }

    /// Endpoint listing every lock of a model.
    pub fn model_url(&self, model: &ModelKey) -> String {
        self.url_for(&[&model.app_label, &model.model_name])
    }

    fn url_for(&self, identity_segments: &[&str]) -> String {
        let host = self.host_url.as_deref().unwrap_or_default();
        match &self.api_url {
            Some(api_url) if api_url.contains("://") => join_segments(&[api_url]),
            Some(api_url) => join_segments(&[host, api_url]),
            None => {
                let mut segments = vec![host, self.api_base_url.as_str()];
                segments.extend_from_slice(identity_segments);
                join_segments(&segments)
            }
        }
    }
}

/// Join non-empty path segments with single slashes and a trailing slash.
///
/// A leading slash on the first non-empty segment is kept so relative
/// endpoints stay rooted (`/locking/api/lock/blog/post/42/`).
pub fn join_segments(segments: &[&str]) -> String {
    let mut url = String::new();
    for segment in segments.iter().filter(|s| !s.trim_matches('/').is_empty()) {
        if url.is_empty() {
            url.push_str(segment.trim_end_matches('/'));
        } else {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
    }
    url.push('/');
    url
}
