//! Check a plugin package manifest for hook eligibility and resolvability.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use hooklift_core::config::AppConfig;
use hooklift_core::types::PackageManifest;
use hooklift_core::{AppError, AppResult};
use hooklift_hooks::EligibilityResolver;
use hooklift_hooks::loader::resolve_hook_path;

use crate::output::{print_success, print_warning};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path of a package manifest JSON document
    pub manifest: PathBuf,
}

/// Execute the check command
pub fn execute(args: &CheckArgs, config: &AppConfig) -> AppResult<()> {
    let raw = fs::read_to_string(&args.manifest)?;
    let package: PackageManifest = serde_json::from_str(&raw).map_err(|e| {
        AppError::validation(format!(
            "'{}' is not a valid package manifest: {e}",
            args.manifest.display()
        ))
    })?;

    let resolver = EligibilityResolver::new(config.hooks.plugin_type.as_str());
    let Some(descriptor) = resolver.resolve(&package) else {
        print_warning(&format!(
            "'{}' is not subject to lifecycle hooks (type '{}', expected '{}')",
            package.name, package.package_type, config.hooks.plugin_type
        ));
        return Ok(());
    };

    let Some(hook_id) = descriptor.hook.as_deref() else {
        print_success(&format!(
            "'{}' is hook-eligible with no hook unit declared",
            descriptor.name
        ));
        return Ok(());
    };

    match resolve_hook_path(hook_id, &descriptor.source_roots, &descriptor.install_path) {
        Some(path) => print_success(&format!(
            "Hook unit '{}' resolves to '{}'",
            hook_id,
            path.display()
        )),
        None => print_warning(&format!(
            "Hook unit '{}' does not resolve to a file under '{}'; hooks will be skipped",
            hook_id,
            descriptor.install_path.display()
        )),
    }
    Ok(())
}
