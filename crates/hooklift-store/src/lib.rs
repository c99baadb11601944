//! # hooklift-store
//!
//! Installed-plugin record store implementations. The engine only knows the
//! [`InstalledPluginStore`](hooklift_core::traits::InstalledPluginStore)
//! trait; this crate provides an in-memory store for tests and dry runs and
//! a JSON-file-backed store for real invocations.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
