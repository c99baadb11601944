//! # hooklift-hooks
//!
//! Lifecycle-hook engine for Hooklift. Provides:
//!
//! - Mapping of host package-manager events to a per-package state machine
//! - Pending-operation tracking across install/update/uninstall batches
//! - Manual hook loading before the host's generated loader exists
//! - Deferred "after" invocation at the loader-rebuild synchronization point
//! - Lazy host runtime bring-up with degraded-capability fallback
//! - Optional dynamic loading via `libloading` (feature `dynamic`)

pub mod definitions;
pub mod eligibility;
pub mod invoker;
pub mod loader;
pub mod macros;
pub mod orchestrator;
pub mod pending;
pub mod prelude;
pub mod registry;
pub mod runtime;
pub mod traits;

pub use definitions::{HookContext, HookMethod};
pub use eligibility::EligibilityResolver;
pub use invoker::HookInvoker;
pub use loader::HookLoader;
pub use orchestrator::HookOrchestrator;
pub use pending::{OperationPhase, PendingEntry, PendingOperations};
pub use registry::HookUnitRegistry;
pub use runtime::RuntimeBootstrapper;
pub use traits::LifecycleHook;
