//! Lifecycle method names and the hook call context.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The fixed set of lifecycle methods a hook unit may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookMethod {
    /// Runs synchronously before a package's files are transferred.
    BeforeInstall,
    /// Runs deferred, after the loader rebuild that followed an install.
    AfterInstall,
    /// Runs synchronously before a package's files are replaced.
    BeforeUpdate,
    /// Runs deferred, after the loader rebuild that followed an update.
    AfterUpdate,
    /// Runs synchronously before a package's files are removed.
    BeforeUninstall,
    /// Runs deferred, after the loader rebuild that followed an uninstall.
    AfterUninstall,
}

impl HookMethod {
    /// Returns the method name as plugin authors know it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeInstall => "before_install",
            Self::AfterInstall => "after_install",
            Self::BeforeUpdate => "before_update",
            Self::AfterUpdate => "after_update",
            Self::BeforeUninstall => "before_uninstall",
            Self::AfterUninstall => "after_uninstall",
        }
    }

    /// Returns whether this is a "before" method with veto semantics.
    pub fn is_before(&self) -> bool {
        matches!(
            self,
            Self::BeforeInstall | Self::BeforeUpdate | Self::BeforeUninstall
        )
    }
}

impl std::fmt::Display for HookMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context record passed to every lifecycle method.
///
/// Install and update calls carry the declared version; uninstall calls do
/// not, because the package is on its way out and the recorded version may
/// already disagree with what is on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookContext {
    /// Package name.
    pub name: String,
    /// Declared version, absent for uninstall calls.
    pub version: Option<String>,
    /// Package install path.
    pub path: PathBuf,
}

impl HookContext {
    /// Context for install and update calls.
    pub fn new(name: &str, version: &str, path: &Path) -> Self {
        Self {
            name: name.to_string(),
            version: Some(version.to_string()),
            path: path.to_path_buf(),
        }
    }

    /// Context for uninstall calls.
    pub fn without_version(name: &str, path: &Path) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            path: path.to_path_buf(),
        }
    }
}
