//! Replay a host package-manager event feed through the hook engine.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use hooklift_core::config::AppConfig;
use hooklift_core::events::PackageEvent;
use hooklift_core::traits::{HostRuntime, InstalledPluginStore};
use hooklift_core::{AppError, AppResult};
use hooklift_hooks::HookOrchestrator;
use hooklift_store::{JsonFileStore, MemoryStore};

use crate::output::print_success;

/// Arguments for the replay command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path of the event feed, one JSON event per line
    pub file: PathBuf,

    /// Run against an in-memory registry, leaving no trace on disk
    #[arg(long)]
    pub dry_run: bool,
}

/// Host runtime for replays: there is no real host application to bring
/// up, so every step succeeds immediately.
#[derive(Debug)]
struct ReplayRuntime;

impl HostRuntime for ReplayRuntime {
    fn load_generated_loader(&self) -> AppResult<()> {
        debug!("Replay runtime: generated loader assumed current");
        Ok(())
    }

    fn bootstrap(&self) -> AppResult<()> {
        Ok(())
    }

    fn startup(&self) -> AppResult<()> {
        debug!("Replay runtime: startup sequence skipped");
        Ok(())
    }
}

/// Execute the replay command
pub fn execute(args: &ReplayArgs, config: &AppConfig) -> AppResult<()> {
    let raw = fs::read_to_string(&args.file)?;

    let store: Box<dyn InstalledPluginStore> = if args.dry_run {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::open(&config.registry.path)?)
    };

    let mut orchestrator = HookOrchestrator::with_plugin_type(
        config.hooks.plugin_type.clone(),
        store,
        Box::new(ReplayRuntime),
    );

    let mut handled = 0usize;
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: PackageEvent = serde_json::from_str(line).map_err(|e| {
            AppError::validation(format!(
                "'{}' line {}: invalid event: {e}",
                args.file.display(),
                line_no + 1
            ))
        })?;

        orchestrator.handle(&event)?;
        handled += 1;
    }

    print_success(&format!(
        "Replayed {handled} events from '{}'",
        args.file.display()
    ));
    Ok(())
}
