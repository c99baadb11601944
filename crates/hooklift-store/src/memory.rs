//! In-memory installed-plugin store.

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{info, warn};

use hooklift_core::AppResult;
use hooklift_core::traits::InstalledPluginStore;
use hooklift_core::types::{InstalledPlugin, NewInstalledPlugin};

/// Insertion-ordered in-memory record store.
///
/// Used by tests and dry runs, and as the working set behind
/// [`JsonFileStore`](crate::json::JsonFileStore). Registry drift never
/// fails a call here: stale updates and removals are logged and ignored.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Package name → record.
    records: IndexMap<String, InstalledPlugin>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with existing records.
    pub fn with_records(records: Vec<InstalledPlugin>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.name.clone(), record))
                .collect(),
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl InstalledPluginStore for MemoryStore {
    fn add(&mut self, plugin: NewInstalledPlugin) -> AppResult<()> {
        let now = Utc::now();
        let record = InstalledPlugin {
            name: plugin.name.clone(),
            version: plugin.version,
            package_type: plugin.package_type,
            path: plugin.path,
            installed_at: now,
            updated_at: now,
        };

        if self.records.insert(plugin.name.clone(), record).is_some() {
            warn!(package = %plugin.name, "Overwrote an existing installed-plugin record");
        } else {
            info!(package = %plugin.name, "Installed-plugin record added");
        }
        Ok(())
    }

    fn update(&mut self, name: &str, version: &str) -> AppResult<()> {
        match self.records.get_mut(name) {
            Some(record) => {
                record.version = version.to_string();
                record.updated_at = Utc::now();
                info!(package = %name, version = %version, "Installed-plugin record updated");
            }
            None => {
                warn!(package = %name, "Update for a package with no record, ignoring");
            }
        }
        Ok(())
    }

    fn remove(&mut self, name: &str) -> AppResult<()> {
        if self.records.shift_remove(name).is_some() {
            info!(package = %name, "Installed-plugin record removed");
        } else {
            warn!(package = %name, "Removal of a package with no record, ignoring");
        }
        Ok(())
    }

    fn list(&self) -> AppResult<Vec<InstalledPlugin>> {
        Ok(self.records.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn plugin(name: &str, version: &str) -> NewInstalledPlugin {
        NewInstalledPlugin {
            name: name.to_string(),
            version: version.to_string(),
            package_type: "hooklift-plugin".to_string(),
            path: PathBuf::from("/opt").join(name),
        }
    }

    #[test]
    fn add_update_remove_roundtrip() {
        let mut store = MemoryStore::new();
        store.add(plugin("acme/widgets", "1.0.0")).unwrap();
        store.add(plugin("acme/gears", "2.0.0")).unwrap();
        store.update("acme/widgets", "1.1.0").unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "acme/widgets");
        assert_eq!(records[0].version, "1.1.0");
        assert!(records[0].updated_at >= records[0].installed_at);

        store.remove("acme/widgets").unwrap();
        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "acme/gears");
    }

    #[test]
    fn stale_update_and_removal_are_ignored() {
        let mut store = MemoryStore::new();
        store.update("acme/ghost", "9.9.9").unwrap();
        store.remove("acme/ghost").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn add_overwrites_existing_record() {
        let mut store = MemoryStore::new();
        store.add(plugin("acme/widgets", "1.0.0")).unwrap();
        store.add(plugin("acme/widgets", "1.5.0")).unwrap();

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].version, "1.5.0");
    }
}
