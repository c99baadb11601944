//! Process-local registry of loaded hook units.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::traits::LifecycleHook;

/// Registry of hook units currently loaded in the process.
///
/// Both compiled-in hooks (registered at startup) and dynamically loaded
/// hook libraries end up here, keyed by their namespaced hook identifier.
/// The loader's "already loaded" check is a lookup in this registry.
#[derive(Debug, Default)]
pub struct HookUnitRegistry {
    /// Hook identifier → hook instance.
    units: HashMap<String, Arc<dyn LifecycleHook>>,
}

impl HookUnitRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Registers a hook unit. An existing unit under the same identifier
    /// is replaced.
    pub fn register(&mut self, hook_id: impl Into<String>, unit: Arc<dyn LifecycleHook>) {
        let hook_id = hook_id.into();
        if self.units.insert(hook_id.clone(), unit).is_some() {
            warn!(hook = %hook_id, "Replaced an already registered hook unit");
        } else {
            debug!(hook = %hook_id, "Hook unit registered");
        }
    }

    /// Gets a hook unit by identifier.
    pub fn get(&self, hook_id: &str) -> Option<Arc<dyn LifecycleHook>> {
        self.units.get(hook_id).cloned()
    }

    /// Checks whether a hook unit is loaded.
    pub fn contains(&self, hook_id: &str) -> bool {
        self.units.contains_key(hook_id)
    }

    /// Returns the number of loaded hook units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
