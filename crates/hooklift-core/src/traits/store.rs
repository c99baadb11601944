//! Installed-plugin record store trait.

use crate::result::AppResult;
use crate::types::{InstalledPlugin, NewInstalledPlugin};

/// External record store of installed plugins.
///
/// The engine calls this only at the loader-rebuild synchronization point,
/// after the matching "after" hook ran. Implementations are assumed to be
/// crash-consistent and independently testable.
pub trait InstalledPluginStore: Send + std::fmt::Debug {
    /// Adds a record. An existing record with the same name is overwritten.
    fn add(&mut self, plugin: NewInstalledPlugin) -> AppResult<()>;

    /// Updates the recorded version of a plugin.
    fn update(&mut self, name: &str, version: &str) -> AppResult<()>;

    /// Removes a record by package name.
    fn remove(&mut self, name: &str) -> AppResult<()>;

    /// Lists all records in insertion order.
    fn list(&self) -> AppResult<Vec<InstalledPlugin>>;
}
