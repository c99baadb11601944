//! Sample lifecycle hook for the `acme/widgets` plugin package.
//!
//! Demonstrates the hook contract: implement the lifecycle points you care
//! about, leave the rest to the default no-op bodies, and export the unit
//! with `export_hook!` so the loader can find it.

use tracing::info;

use hooklift_hooks::export_hook;
use hooklift_hooks::prelude::{HookContext, LifecycleHook};

/// Hook for the widgets plugin. Vetoes installation into a path that does
/// not exist and announces the remaining lifecycle points.
#[derive(Debug, Default)]
pub struct WidgetHook;

impl LifecycleHook for WidgetHook {
    fn before_install(&self, ctx: &HookContext) -> Result<(), String> {
        if !ctx.path.exists() {
            return Err(format!(
                "install path '{}' does not exist",
                ctx.path.display()
            ));
        }
        Ok(())
    }

    fn after_install(&self, ctx: &HookContext) -> Result<(), String> {
        info!(package = %ctx.name, "widgets plugin installed");
        Ok(())
    }

    fn after_update(&self, ctx: &HookContext) -> Result<(), String> {
        let version = ctx.version.as_deref().unwrap_or("unknown");
        info!(package = %ctx.name, version = %version, "widgets plugin updated");
        Ok(())
    }

    fn after_uninstall(&self, ctx: &HookContext) -> Result<(), String> {
        info!(package = %ctx.name, "widgets plugin removed");
        Ok(())
    }
}

export_hook!(WidgetHook);
