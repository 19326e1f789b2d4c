//! Error types for formlock.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Network outcomes inside the lease state machine are never errors; they are
//! delivered as typed replies. This type covers everything that must stop an
//! operation: bad configuration, failed one-shot requests, and conflicts
//! reported to the CLI.

use crate::exit_codes;
use crate::plugins::RegistrationError;
use thiserror::Error;

/// Main error type for formlock operations.
#[derive(Error, Debug)]
pub enum LockingError {
    /// User provided invalid arguments or the system is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be read or failed validation.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// A plugin was registered without both of its capabilities.
    #[error("Plugin registration failed: {0}")]
    PluginError(#[from] RegistrationError),

    /// The lock API could not be reached or answered with a server error.
    #[error("Lock API request failed: {0}")]
    TransportError(String),

    /// The record is leased to another user.
    #[error("Lock is held by another user: {0}")]
    LockConflict(String),
}

impl LockingError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockingError::UserError(_) => exit_codes::USER_ERROR,
            LockingError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            LockingError::PluginError(_) => exit_codes::CONFIG_FAILURE,
            LockingError::TransportError(_) => exit_codes::NETWORK_FAILURE,
            LockingError::LockConflict(_) => exit_codes::LOCK_FAILURE,
        }
    }
}

/// Result type alias for formlock operations.
pub type Result<T> = std::result::Result<T, LockingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::Capability;

    #[test]
    fn config_errors_share_exit_code() {
        let err = LockingError::ConfigError("ping_seconds".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);

        let err: LockingError = RegistrationError {
            index: 0,
            name: "editor".to_string(),
            capability: Capability::Disable,
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn transport_and_conflict_exit_codes() {
        let err = LockingError::TransportError("connection refused".to_string());
        assert_eq!(err.exit_code(), exit_codes::NETWORK_FAILURE);

        let err = LockingError::LockConflict("bob".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LockingError::LockConflict("Bob Smith (bob@x.com)".to_string());
        assert_eq!(
            err.to_string(),
            "Lock is held by another user: Bob Smith (bob@x.com)"
        );

        let err: LockingError = RegistrationError {
            index: 1,
            name: "rich-text".to_string(),
            capability: Capability::Enable,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Plugin registration failed: plugin #1 'rich-text' is missing its 'enable' capability"
        );
    }
}
