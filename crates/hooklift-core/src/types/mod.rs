//! Shared domain types.

pub mod package;
pub mod record;

pub use package::{PackageExtra, PackageManifest, PluginDescriptor};
pub use record::{InstalledPlugin, NewInstalledPlugin};
