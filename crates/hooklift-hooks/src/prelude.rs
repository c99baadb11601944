//! Prelude for convenient imports in hook crates.

pub use crate::definitions::{HookContext, HookMethod};
pub use crate::traits::LifecycleHook;

pub use crate::export_hook;
