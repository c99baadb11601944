//! Hook engine configuration.

use serde::{Deserialize, Serialize};

/// Hook engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Package type that marks a package as subject to lifecycle hooks.
    #[serde(default = "default_plugin_type")]
    pub plugin_type: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            plugin_type: default_plugin_type(),
        }
    }
}

fn default_plugin_type() -> String {
    "hooklift-plugin".to_string()
}
