//! Pending-operation registry — per-package state across a batch.

use indexmap::IndexMap;

use hooklift_core::types::PluginDescriptor;

/// The operation category a pending entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationPhase {
    /// The package was installed this batch.
    Install,
    /// The package was updated this batch.
    Update,
    /// The package was uninstalled this batch.
    Uninstall,
}

impl OperationPhase {
    /// Returns the phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Update => "update",
            Self::Uninstall => "uninstall",
        }
    }
}

impl std::fmt::Display for OperationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded obligation to run an "after" hook and persist the outcome
/// once the loader-rebuild event fires.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    /// The package the obligation belongs to.
    pub descriptor: PluginDescriptor,
    /// The operation category.
    pub phase: OperationPhase,
}

/// Three phase-keyed mappings of pending entries, keyed by package name.
///
/// A name recorded twice in the same phase keeps its original position;
/// the newer descriptor wins. No locking: the host process model is
/// single-threaded and cooperative, so every access is serialized by the
/// host's own control flow.
#[derive(Debug, Default)]
pub struct PendingOperations {
    installs: IndexMap<String, PendingEntry>,
    updates: IndexMap<String, PendingEntry>,
    uninstalls: IndexMap<String, PendingEntry>,
}

impl PendingOperations {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pending install for the package.
    pub fn record_install(&mut self, descriptor: PluginDescriptor) {
        Self::record(&mut self.installs, descriptor, OperationPhase::Install);
    }

    /// Records a pending update for the package.
    pub fn record_update(&mut self, descriptor: PluginDescriptor) {
        Self::record(&mut self.updates, descriptor, OperationPhase::Update);
    }

    /// Records a pending uninstall for the package.
    pub fn record_uninstall(&mut self, descriptor: PluginDescriptor) {
        Self::record(&mut self.uninstalls, descriptor, OperationPhase::Uninstall);
    }

    fn record(
        map: &mut IndexMap<String, PendingEntry>,
        descriptor: PluginDescriptor,
        phase: OperationPhase,
    ) {
        map.insert(descriptor.name.clone(), PendingEntry { descriptor, phase });
    }

    /// Takes and clears all pending installs, in insertion order.
    pub fn drain_installs(&mut self) -> Vec<PendingEntry> {
        std::mem::take(&mut self.installs).into_values().collect()
    }

    /// Takes and clears all pending updates, in insertion order.
    pub fn drain_updates(&mut self) -> Vec<PendingEntry> {
        std::mem::take(&mut self.updates).into_values().collect()
    }

    /// Takes and clears all pending uninstalls, in insertion order.
    pub fn drain_uninstalls(&mut self) -> Vec<PendingEntry> {
        std::mem::take(&mut self.uninstalls).into_values().collect()
    }

    /// Returns whether nothing is pending in any phase.
    pub fn is_empty(&self) -> bool {
        self.installs.is_empty() && self.updates.is_empty() && self.uninstalls.is_empty()
    }
}
