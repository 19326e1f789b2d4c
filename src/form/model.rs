//! The editing form surface and an in-memory implementation.

/// Identifier of a form control (input, select, textarea, button...).
pub type ControlId = String;

/// The interactive surface a [`super::LockingForm`] toggles.
pub trait Form {
    /// Identifier of the form; plugins use it to decide what they own.
    fn id(&self) -> &str;

    /// Every control of the form, in document order.
    fn controls(&self) -> Vec<ControlId>;

    fn is_disabled(&self, control: &str) -> bool;

    fn set_disabled(&mut self, control: &str, disabled: bool);

    /// Block or re-permit submission.
    fn set_submit_blocked(&mut self, blocked: bool);

    /// Show or remove the notice rendered above the form.
    fn set_notice(&mut self, notice: Option<String>);
}

#[derive(Debug, Clone)]
struct Control {
    id: ControlId,
    disabled: bool,
    mutations: usize,
}

/// A form held in memory.
///
/// Counts every disabled-attribute write per control so callers can check
/// that a control was toggled exactly once.
#[derive(Debug, Clone)]
pub struct FormModel {
    id: String,
    controls: Vec<Control>,
    submit_blocked: bool,
    notice: Option<String>,
}

impl FormModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            controls: Vec::new(),
            submit_blocked: false,
            notice: None,
        }
    }

    pub fn with_controls<I, S>(id: impl Into<String>, controls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut form = Self::new(id);
        for control in controls {
            form.add_control(control);
        }
        form
    }

    /// Add an enabled control.
    pub fn add_control(&mut self, id: impl Into<String>) -> &mut Self {
        self.controls.push(Control {
            id: id.into(),
            disabled: false,
            mutations: 0,
        });
        self
    }

    /// Add a control that is disabled for reasons unrelated to locking.
    pub fn add_disabled_control(&mut self, id: impl Into<String>) -> &mut Self {
        self.controls.push(Control {
            id: id.into(),
            disabled: true,
            mutations: 0,
        });
        self
    }

    pub fn submit_blocked(&self) -> bool {
        self.submit_blocked
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Number of disabled-attribute writes made to `control`.
    pub fn attribute_mutations(&self, control: &str) -> usize {
        self.find(control).map_or(0, |c| c.mutations)
    }

    pub fn disabled_controls(&self) -> Vec<ControlId> {
        self.controls
            .iter()
            .filter(|c| c.disabled)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Whether a submit would go through.
    pub fn try_submit(&self) -> bool {
        !self.submit_blocked
    }

    fn find(&self, control: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.id == control)
    }
}

impl Form for FormModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn controls(&self) -> Vec<ControlId> {
        self.controls.iter().map(|c| c.id.clone()).collect()
    }

    fn is_disabled(&self, control: &str) -> bool {
        self.find(control).is_some_and(|c| c.disabled)
    }

    fn set_disabled(&mut self, control: &str, disabled: bool) {
        if let Some(c) = self.controls.iter_mut().find(|c| c.id == control) {
            c.disabled = disabled;
            c.mutations += 1;
        }
    }

    fn set_submit_blocked(&mut self, blocked: bool) {
        self.submit_blocked = blocked;
    }

    fn set_notice(&mut self, notice: Option<String>) {
        self.notice = notice;
    }
}
