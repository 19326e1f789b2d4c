//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a formlock client.
///
/// This struct represents the contents of the YAML config file.
/// Unknown fields are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Endpoint settings
    // =========================================================================
    /// Scheme and host of the lock server (e.g. `https://cms.example.com`).
    pub host_url: Option<String>,

    /// Path of the lock API below `host_url` (default: "/locking/api/lock").
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Explicit endpoint that replaces base URL and identity segments.
    pub api_url: Option<String>,

    /// Opaque session credential forwarded as a `Cookie` header.
    pub session_cookie: Option<String>,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    // =========================================================================
    // Lease settings
    // =========================================================================
    /// Seconds between lease renewals (default: 15).
    #[serde(default = "default_ping_seconds")]
    pub ping_seconds: u64,

    /// Username the server reports for our own leases.
    #[serde(default = "default_current_user")]
    pub current_user: String,

    /// How the lease is released at the end of a session.
    #[serde(default)]
    pub release_mode: ReleaseMode,

    // =========================================================================
    // Session settings
    // =========================================================================
    /// Path of the cookie jar carrying the takeover handoff.
    #[serde(default = "default_cookie_jar")]
    pub cookie_jar: String,

    /// Controls of the headless editing form.
    #[serde(default = "default_controls")]
    pub controls: Vec<String>,

    /// Render the admin-style "form is locked by" notice.
    #[serde(default = "default_true")]
    pub admin_notice: bool,

    /// Localized user-facing strings.
    pub messages: Messages,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host_url: None,
            api_base_url: default_api_base_url(),
            api_url: None,
            session_cookie: None,
            timeout_seconds: default_timeout_seconds(),
            ping_seconds: default_ping_seconds(),
            current_user: default_current_user(),
            release_mode: ReleaseMode::default(),
            cookie_jar: default_cookie_jar(),
            controls: default_controls(),
            admin_notice: true,
            messages: Messages::default(),
        }
    }
}
