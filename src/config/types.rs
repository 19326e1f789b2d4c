//! Configuration types and defaults for formlock.

use serde::{Deserialize, Serialize};

/// How the lease is released when the editing session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseMode {
    /// `DELETE` on the resource endpoint (default).
    #[default]
    Delete,
    /// `POST` to the resource's `delete-beacon/` endpoint, for servers that
    /// only accept POST during navigation.
    Beacon,
}

/// Localized strings shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Listing tooltip for rows the current user is editing.
    pub locked_by_me: String,
    /// Listing tooltip prefix for rows leased to someone else.
    pub locked_by_user: String,
    /// Label of the takeover action in the locked notice.
    pub take_lock: String,
    /// Prefix of the locked notice rendered into the form.
    pub form_is_locked_by: String,
    /// Alert shown when a held lease is taken by another user.
    pub lock_was_taken: String,
    /// Confirmation prompt before a takeover.
    pub confirm_take_lock: String,
    /// Alert shown (once) when the lock API is unreachable.
    pub network_warning: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            locked_by_me: "You are currently editing this".to_string(),
            locked_by_user: "Locked by".to_string(),
            take_lock: "Take over lock".to_string(),
            form_is_locked_by: "Form is locked by".to_string(),
            lock_was_taken: "Another user has taken your lock of this form".to_string(),
            confirm_take_lock: "Are you sure you want to remove this lock?".to_string(),
            network_warning: "Warning! Due to loss of network connectivity or a server error, \
                              you may not be able to submit this form."
                .to_string(),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_api_base_url() -> String {
    "/locking/api/lock".to_string()
}
pub(crate) fn default_ping_seconds() -> u64 {
    15
}
pub(crate) fn default_timeout_seconds() -> u64 {
    10
}
pub(crate) fn default_cookie_jar() -> String {
    ".formlock/cookies.json".to_string()
}
pub(crate) fn default_controls() -> Vec<String> {
    vec!["content".to_string()]
}
pub(crate) fn default_true() -> bool {
    true
}
pub(crate) fn default_current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}
