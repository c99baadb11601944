//! Installed-plugin registry configuration.

use serde::{Deserialize, Serialize};

/// Installed-plugin registry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Path of the JSON document holding installed-plugin records.
    #[serde(default = "default_registry_path")]
    pub path: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
        }
    }
}

fn default_registry_path() -> String {
    "data/plugins.json".to_string()
}
