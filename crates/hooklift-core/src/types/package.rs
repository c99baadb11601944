//! Package metadata as reported by the host package manager.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Raw package description carried by every host package-manager event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name (unique key, e.g. `"acme/widgets"`).
    pub name: String,
    /// Declared package version.
    pub version: String,
    /// Declared package type tag.
    #[serde(rename = "type", default)]
    pub package_type: String,
    /// Absolute install path of the package on disk.
    pub install_path: PathBuf,
    /// Hook-related extension metadata.
    #[serde(default)]
    pub extra: PackageExtra,
}

/// Hook-related extension metadata declared by a plugin package.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageExtra {
    /// Namespaced identifier of the package's lifecycle hook unit,
    /// e.g. `"acme.widgets.WidgetHook"`.
    #[serde(default)]
    pub hook: Option<String>,
    /// Namespace prefix to subdirectory mapping used to locate the hook
    /// unit under the package's install path.
    #[serde(default)]
    pub source_roots: BTreeMap<String, String>,
}

/// Hook-relevant view of an eligible package, derived once per event.
///
/// Immutable after derivation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    /// Package name.
    pub name: String,
    /// Declared version.
    pub version: String,
    /// Install path on disk.
    pub install_path: PathBuf,
    /// Declared hook unit identifier, if any.
    pub hook: Option<String>,
    /// Declared namespace prefix to subdirectory mapping.
    pub source_roots: BTreeMap<String, String>,
}

impl PluginDescriptor {
    /// Derives a descriptor from a raw package manifest.
    pub fn from_manifest(manifest: &PackageManifest) -> Self {
        Self {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            install_path: manifest.install_path.clone(),
            hook: manifest.extra.hook.clone(),
            source_roots: manifest.extra.source_roots.clone(),
        }
    }
}
