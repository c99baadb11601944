//! Eligibility resolver — decides which packages are subject to hooks.

use hooklift_core::types::{PackageManifest, PluginDescriptor};

/// Package type tag that marks a package as a Hooklift plugin.
pub const DEFAULT_PLUGIN_TYPE: &str = "hooklift-plugin";

/// Resolves raw package metadata to a plugin descriptor.
///
/// A package is eligible when its declared type equals the configured
/// sentinel. Ineligible packages are ignored at every phase: no pending
/// entry, no hook path, no registry write. Side-effect-free.
#[derive(Debug, Clone)]
pub struct EligibilityResolver {
    /// The sentinel package type.
    plugin_type: String,
}

impl EligibilityResolver {
    /// Creates a resolver for the given sentinel package type.
    pub fn new(plugin_type: impl Into<String>) -> Self {
        Self {
            plugin_type: plugin_type.into(),
        }
    }

    /// Returns the sentinel package type.
    pub fn plugin_type(&self) -> &str {
        &self.plugin_type
    }

    /// Derives a descriptor when the package is subject to hooks.
    pub fn resolve(&self, package: &PackageManifest) -> Option<PluginDescriptor> {
        if package.package_type != self.plugin_type {
            return None;
        }
        Some(PluginDescriptor::from_manifest(package))
    }
}

impl Default for EligibilityResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PLUGIN_TYPE)
    }
}
