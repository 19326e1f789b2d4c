//! Plugin contract and the ordered registry.

use crate::form::{ControlId, Form};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Custom enable/disable rules for widgets the generic pass cannot handle.
///
/// Plugins run for every form; each must decide on its own which widgets
/// belong to the form it is given, and must tolerate repeated calls.
pub trait FormPlugin {
    fn name(&self) -> &str;

    fn enable(&self, form: &mut dyn Form);

    /// Make the plugin's widgets read-only. Returns the controls the plugin
    /// manages itself so the generic pass leaves them alone.
    fn disable(&self, form: &mut dyn Form) -> Vec<ControlId>;
}

/// The two capabilities every plugin must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Enable,
    Disable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Enable => write!(f, "enable"),
            Capability::Disable => write!(f, "disable"),
        }
    }
}

/// A spec passed to [`PluginRegistry::register`] lacked a capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("plugin #{index} '{name}' is missing its '{capability}' capability")]
pub struct RegistrationError {
    /// Position of the offending spec in the registered batch.
    pub index: usize,
    pub name: String,
    pub capability: Capability,
}

type EnableFn = Box<dyn Fn(&mut dyn Form)>;
type DisableFn = Box<dyn Fn(&mut dyn Form) -> Vec<ControlId>>;

/// A plugin assembled from closures; validated when registered.
pub struct PluginSpec {
    name: String,
    enable: Option<EnableFn>,
    disable: Option<DisableFn>,
}

impl PluginSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enable: None,
            disable: None,
        }
    }

    pub fn on_enable(mut self, f: impl Fn(&mut dyn Form) + 'static) -> Self {
        self.enable = Some(Box::new(f));
        self
    }

    pub fn on_disable(mut self, f: impl Fn(&mut dyn Form) -> Vec<ControlId> + 'static) -> Self {
        self.disable = Some(Box::new(f));
        self
    }

    fn missing_capability(&self) -> Option<Capability> {
        if self.enable.is_none() {
            Some(Capability::Enable)
        } else if self.disable.is_none() {
            Some(Capability::Disable)
        } else {
            None
        }
    }
}

impl fmt::Debug for PluginSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginSpec")
            .field("name", &self.name)
            .field("enable", &self.enable.is_some())
            .field("disable", &self.disable.is_some())
            .finish()
    }
}

struct ClosurePlugin {
    name: String,
    enable: EnableFn,
    disable: DisableFn,
}

impl FormPlugin for ClosurePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn enable(&self, form: &mut dyn Form) {
        (self.enable)(form)
    }

    fn disable(&self, form: &mut dyn Form) -> Vec<ControlId> {
        (self.disable)(form)
    }
}

/// Ordered collection of plugins, invoked on every form transition.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn FormPlugin>>,
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|p| p.name()))
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch of closure-built plugins.
    ///
    /// Every spec is checked first; if any lacks a capability nothing is
    /// registered. Returns the number of plugins added.
    pub fn register<I>(&mut self, specs: I) -> Result<usize, RegistrationError>
    where
        I: IntoIterator<Item = PluginSpec>,
    {
        let specs: Vec<PluginSpec> = specs.into_iter().collect();

        if let Some((index, spec, capability)) = specs
            .iter()
            .enumerate()
            .find_map(|(i, s)| s.missing_capability().map(|c| (i, s, c)))
        {
            return Err(RegistrationError {
                index,
                name: spec.name.clone(),
                capability,
            });
        }

        let added = specs.len();
        for spec in specs {
            if let (Some(enable), Some(disable)) = (spec.enable, spec.disable) {
                tracing::debug!(plugin = %spec.name, "registered form plugin");
                self.plugins.push(Box::new(ClosurePlugin {
                    name: spec.name,
                    enable,
                    disable,
                }));
            }
        }
        Ok(added)
    }

    /// Register a typed plugin; the trait guarantees both capabilities.
    pub fn register_plugin(&mut self, plugin: impl FormPlugin + 'static) {
        tracing::debug!(plugin = %plugin.name(), "registered form plugin");
        self.plugins.push(Box::new(plugin));
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Call every plugin's `enable`, in registration order.
    pub fn for_each_enable(&self, form: &mut dyn Form) {
        for plugin in &self.plugins {
            plugin.enable(form);
        }
    }

    /// Call every plugin's `disable`, in registration order, and collect the
    /// controls they manage themselves.
    pub fn for_each_disable(&self, form: &mut dyn Form) -> BTreeSet<ControlId> {
        let mut managed = BTreeSet::new();
        for plugin in &self.plugins {
            managed.extend(plugin.disable(form));
        }
        managed
    }
}
