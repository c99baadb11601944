//! List installed-plugin records.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hooklift_core::AppResult;
use hooklift_core::config::AppConfig;
use hooklift_core::traits::InstalledPluginStore;
use hooklift_store::JsonFileStore;

use crate::output::{OutputFormat, print_list};

/// Arguments for the list command
#[derive(Debug, Args)]
pub struct ListArgs {}

/// Table row for an installed plugin
#[derive(Debug, Serialize, Tabled)]
struct PluginRow {
    /// Package name
    #[tabled(rename = "NAME")]
    name: String,
    /// Installed version
    #[tabled(rename = "VERSION")]
    version: String,
    /// Package type tag
    #[tabled(rename = "TYPE")]
    package_type: String,
    /// Install path
    #[tabled(rename = "PATH")]
    path: String,
    /// Install timestamp
    #[tabled(rename = "INSTALLED")]
    installed_at: String,
}

/// Execute the list command
pub fn execute(_args: &ListArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let store = JsonFileStore::open(&config.registry.path)?;

    let rows: Vec<PluginRow> = store
        .list()?
        .into_iter()
        .map(|record| PluginRow {
            name: record.name,
            version: record.version,
            package_type: record.package_type,
            path: record.path.display().to_string(),
            installed_at: record.installed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect();

    print_list(&rows, format);
    Ok(())
}
