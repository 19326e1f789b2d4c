//! Form plugin registry.
//!
//! Some widgets need custom logic to become read-only: rich-text editors,
//! date pickers, autocomplete boxes. Each integration registers a plugin with
//! an `enable` and a `disable` capability; the locking form calls every
//! registered plugin, in registration order, whenever it changes state.
//!
//! Closure-built plugins are validated when registered: a batch containing a
//! spec without both capabilities is rejected as a whole with a
//! [`RegistrationError`].

mod editor;
mod registry;


pub use editor::{EditorPool, EditorStatus, RichTextEditor, RichTextPlugin};
pub use registry::{Capability, FormPlugin, PluginRegistry, PluginSpec, RegistrationError};
