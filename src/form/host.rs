//! The page hosting a locking form: dialogs, reload, notifications.

use std::fmt;

/// Notifications emitted once per form transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// `locking:form-disabled`
    Disabled,
    /// `locking:form-enabled`
    Enabled,
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormEvent::Disabled => write!(f, "locking:form-disabled"),
            FormEvent::Enabled => write!(f, "locking:form-enabled"),
        }
    }
}

/// Capabilities the state machine needs from its surroundings.
pub trait Host {
    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `true` means confirmed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Replace the page with a fresh copy from the server.
    fn reload(&mut self);

    fn notify(&mut self, event: FormEvent);
}
