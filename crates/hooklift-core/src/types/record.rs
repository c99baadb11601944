//! Installed-plugin record types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row in the external installed-plugin record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledPlugin {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Declared package type tag.
    #[serde(rename = "type")]
    pub package_type: String,
    /// Install path on disk.
    pub path: PathBuf,
    /// When the record was first added.
    pub installed_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for adding a new installed-plugin record.
///
/// The store stamps `installed_at` / `updated_at` itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstalledPlugin {
    /// Package name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Declared package type tag.
    #[serde(rename = "type")]
    pub package_type: String,
    /// Install path on disk.
    pub path: PathBuf,
}
