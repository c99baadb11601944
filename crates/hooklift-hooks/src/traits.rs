//! The hook contract plugin authors implement.

use crate::definitions::HookContext;

/// A plugin's lifecycle hook unit.
///
/// Every method has a default no-op body; plugins implement only the
/// lifecycle points they care about. A method reports rejection by
/// returning `Err` with a reason string; for `before_*` methods this
/// vetoes the package operation.
pub trait LifecycleHook: Send + Sync + std::fmt::Debug {
    /// Called before the package's files are transferred.
    fn before_install(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }

    /// Called after the loader rebuild that followed an install.
    fn after_install(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }

    /// Called before the package's files are replaced.
    fn before_update(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }

    /// Called after the loader rebuild that followed an update.
    fn after_update(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }

    /// Called before the package's files are removed.
    fn before_uninstall(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }

    /// Called after the loader rebuild that followed an uninstall.
    fn after_uninstall(&self, _ctx: &HookContext) -> Result<(), String> {
        Ok(())
    }
}
