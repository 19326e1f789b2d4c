//! Read-only toggling for rich-text editor widgets.
//!
//! Rich-text editors replace a plain source control with their own surface,
//! so setting the disabled attribute on the source control does nothing
//! useful. The plugin flips the editor's read-only mode instead and tells the
//! generic pass to leave the source control alone.

use super::registry::FormPlugin;
use crate::form::{ControlId, Form};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Loading,
    Ready,
}

/// One editor instance on the page.
#[derive(Debug, Clone)]
pub struct RichTextEditor {
    pub id: String,
    /// Form the editor is a descendant of.
    pub form_id: String,
    /// Plain control the editor replaces.
    pub source_control: ControlId,
    pub status: EditorStatus,
    pub read_only: bool,
    /// Read-only state to apply once the editor becomes ready.
    deferred: Option<bool>,
}

/// Every editor instance on the page, shared with the plugin.
#[derive(Debug, Clone, Default)]
pub struct EditorPool {
    editors: Rc<RefCell<Vec<RichTextEditor>>>,
}

impl EditorPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a still-loading editor to `form_id`, replacing `source_control`.
    pub fn attach(
        &self,
        id: impl Into<String>,
        form_id: impl Into<String>,
        source_control: impl Into<ControlId>,
    ) {
        self.editors.borrow_mut().push(RichTextEditor {
            id: id.into(),
            form_id: form_id.into(),
            source_control: source_control.into(),
            status: EditorStatus::Loading,
            read_only: false,
            deferred: None,
        });
    }

    /// The editor finished loading; apply any deferred read-only toggle.
    pub fn mark_ready(&self, id: &str) {
        let mut editors = self.editors.borrow_mut();
        if let Some(editor) = editors.iter_mut().find(|e| e.id == id) {
            editor.status = EditorStatus::Ready;
            if let Some(read_only) = editor.deferred.take() {
                editor.read_only = read_only;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<RichTextEditor> {
        self.editors.borrow().iter().find(|e| e.id == id).cloned()
    }

    /// Toggle every editor owned by `form_id`; returns their source controls.
    fn set_read_only(&self, form_id: &str, read_only: bool) -> Vec<ControlId> {
        let mut editors = self.editors.borrow_mut();
        editors
            .iter_mut()
            .filter(|e| e.form_id == form_id)
            .map(|editor| {
                match editor.status {
                    EditorStatus::Ready => editor.read_only = read_only,
                    EditorStatus::Loading => editor.deferred = Some(read_only),
                }
                editor.source_control.clone()
            })
            .collect()
    }
}

/// Plugin toggling the read-only mode of rich-text editors.
#[derive(Debug, Clone)]
pub struct RichTextPlugin {
    pool: EditorPool,
}

impl RichTextPlugin {
    pub fn new(pool: EditorPool) -> Self {
        Self { pool }
    }
}

impl FormPlugin for RichTextPlugin {
    fn name(&self) -> &str {
        "rich-text"
    }

    fn enable(&self, form: &mut dyn Form) {
        self.pool.set_read_only(form.id(), false);
    }

    fn disable(&self, form: &mut dyn Form) -> Vec<ControlId> {
        self.pool.set_read_only(form.id(), true)
    }
}
