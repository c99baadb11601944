//! JSON-file-backed installed-plugin store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use hooklift_core::traits::InstalledPluginStore;
use hooklift_core::types::{InstalledPlugin, NewInstalledPlugin};
use hooklift_core::{AppError, AppResult};

use crate::memory::MemoryStore;

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    /// Installed-plugin records in insertion order.
    plugins: Vec<InstalledPlugin>,
}

/// Record store persisted as a single JSON document.
///
/// The whole document is loaded on open and atomically rewritten
/// (temp file + rename) after every mutation, so a crash mid-write leaves
/// the previous document intact.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path of the JSON document.
    path: PathBuf,
    /// Working set.
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens a store at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let document = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str::<RegistryDocument>(&raw).map_err(|e| {
                AppError::storage(format!(
                    "Installed-plugin registry '{}' is not valid JSON: {e}",
                    path.display()
                ))
            })?
        } else {
            RegistryDocument::default()
        };

        debug!(
            path = %path.display(),
            plugins = document.plugins.len(),
            "Installed-plugin registry opened"
        );

        Ok(Self {
            path,
            inner: MemoryStore::with_records(document.plugins),
        })
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> AppResult<()> {
        let document = RegistryDocument {
            plugins: self.inner.list()?,
        };
        let raw = serde_json::to_vec_pretty(&document)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl InstalledPluginStore for JsonFileStore {
    fn add(&mut self, plugin: NewInstalledPlugin) -> AppResult<()> {
        self.inner.add(plugin)?;
        self.persist()
    }

    fn update(&mut self, name: &str, version: &str) -> AppResult<()> {
        self.inner.update(name, version)?;
        self.persist()
    }

    fn remove(&mut self, name: &str) -> AppResult<()> {
        self.inner.remove(name)?;
        self.persist()
    }

    fn list(&self) -> AppResult<Vec<InstalledPlugin>> {
        self.inner.list()
    }
}
