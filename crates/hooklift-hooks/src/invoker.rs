//! Hook invoker — dispatches a named lifecycle method on a hook unit.

use std::sync::Arc;

use tracing::debug;

use hooklift_core::{AppError, AppResult};

use crate::definitions::{HookContext, HookMethod};
use crate::traits::LifecycleHook;

/// Calls lifecycle methods with the correct context payload.
///
/// A method the plugin did not implement falls through to the trait's
/// default no-op body. A plugin-raised failure is mapped into an
/// [`AppError`] carrying the package, method, and reason, and is never
/// swallowed here.
#[derive(Debug, Default)]
pub struct HookInvoker;

impl HookInvoker {
    /// Creates a new invoker.
    pub fn new() -> Self {
        Self
    }

    /// Invokes `method` on `unit` with the given context.
    pub fn invoke(
        &self,
        unit: &Arc<dyn LifecycleHook>,
        package: &str,
        method: HookMethod,
        ctx: &HookContext,
    ) -> AppResult<()> {
        debug!(package = %package, method = %method, "Invoking lifecycle hook");

        let result = match method {
            HookMethod::BeforeInstall => unit.before_install(ctx),
            HookMethod::AfterInstall => unit.after_install(ctx),
            HookMethod::BeforeUpdate => unit.before_update(ctx),
            HookMethod::AfterUpdate => unit.after_update(ctx),
            HookMethod::BeforeUninstall => unit.before_uninstall(ctx),
            HookMethod::AfterUninstall => unit.after_uninstall(ctx),
        };

        result.map_err(|reason| {
            AppError::plugin(format!("Hook '{package}' {method} failed: {reason}"))
        })
    }
}
