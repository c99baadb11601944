//! Lifecycle events emitted by the host package manager.
//!
//! The host emits phase events in a fixed order per batch:
//! pre-operation, post-operation, and finally a single `loader-rebuild`
//! once package files on disk have settled and the generated loader has
//! been regenerated.

use serde::{Deserialize, Serialize};

use crate::types::PackageManifest;

/// A single phase notification from the host package manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PackageEvent {
    /// Fired before a package's files are transferred.
    PreInstall {
        /// The package being installed.
        package: PackageManifest,
    },
    /// Fired after a package's files are on disk, before the loader rebuild.
    PostInstall {
        /// The package that was installed.
        package: PackageManifest,
    },
    /// Fired before a package's files are replaced.
    PreUpdate {
        /// The package being updated (carries the new version).
        package: PackageManifest,
    },
    /// Fired after a package's files were replaced, before the loader rebuild.
    PostUpdate {
        /// The package that was updated.
        package: PackageManifest,
    },
    /// Fired before a package's files are removed.
    PreUninstall {
        /// The package being uninstalled.
        package: PackageManifest,
    },
    /// Fired after a package's files were removed.
    PostUninstall {
        /// The package that was uninstalled.
        package: PackageManifest,
    },
    /// Fired once per batch after the host regenerated its loader.
    LoaderRebuild,
}

impl PackageEvent {
    /// Returns the wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PreInstall { .. } => "pre-install",
            Self::PostInstall { .. } => "post-install",
            Self::PreUpdate { .. } => "pre-update",
            Self::PostUpdate { .. } => "post-update",
            Self::PreUninstall { .. } => "pre-uninstall",
            Self::PostUninstall { .. } => "post-uninstall",
            Self::LoaderRebuild => "loader-rebuild",
        }
    }

    /// Returns the package carried by this event, if any.
    pub fn package(&self) -> Option<&PackageManifest> {
        match self {
            Self::PreInstall { package }
            | Self::PostInstall { package }
            | Self::PreUpdate { package }
            | Self::PostUpdate { package }
            | Self::PreUninstall { package }
            | Self::PostUninstall { package } => Some(package),
            Self::LoaderRebuild => None,
        }
    }
}

impl std::fmt::Display for PackageEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_wire_names_are_kebab_case() {
        let json = r#"{"event":"pre-install","package":{"name":"acme/widgets","version":"1.2.0","type":"hooklift-plugin","install_path":"/tmp/acme"}}"#;
        let event: PackageEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.name(), "pre-install");
        assert_eq!(event.package().unwrap().name, "acme/widgets");
    }

    #[test]
    fn loader_rebuild_carries_no_package() {
        let event: PackageEvent = serde_json::from_str(r#"{"event":"loader-rebuild"}"#).unwrap();
        assert_eq!(event.name(), "loader-rebuild");
        assert!(event.package().is_none());
    }
}
