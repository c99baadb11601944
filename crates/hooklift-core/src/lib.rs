//! # hooklift-core
//!
//! Core crate for Hooklift. Contains configuration schemas, package and
//! event types, collaborator traits (installed-plugin store, host runtime),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other Hooklift crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
