//! Presentation strategies for specialized forms.

use super::model::Form;
use crate::api::LockHolder;
use crate::config::Messages;

/// Hooks run alongside the generic enable/disable sequences.
pub trait FormStrategy {
    /// Runs once when the form becomes read-only.
    fn on_disable(&mut self, _form: &mut dyn Form, _holder: Option<&LockHolder>) {}

    /// Runs once when the form becomes editable again.
    fn on_enable(&mut self, _form: &mut dyn Form) {}

    /// Runs after the user confirmed a takeover, before the request goes out.
    fn on_takeover(&mut self) {}
}

/// No extra presentation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainForm;

impl FormStrategy for PlainForm {}

/// Admin-style form: explains who holds the lease and offers a takeover.
#[derive(Debug, Clone)]
pub struct AdminForm {
    messages: Messages,
}

impl AdminForm {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    /// "Form is locked by Bob Smith (bob@x.com) [Take over lock]"
    pub fn locked_notice(&self, holder: Option<&LockHolder>) -> String {
        let who = holder.map_or_else(|| "another user".to_string(), |h| h.to_string());
        format!(
            "{} {} [{}]",
            self.messages.form_is_locked_by, who, self.messages.take_lock
        )
    }
}

impl FormStrategy for AdminForm {
    fn on_disable(&mut self, form: &mut dyn Form, holder: Option<&LockHolder>) {
        form.set_notice(Some(self.locked_notice(holder)));
    }

    fn on_enable(&mut self, form: &mut dyn Form) {
        form.set_notice(None);
    }
}
