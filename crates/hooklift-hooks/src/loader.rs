//! Manual hook loading, usable before the host's generated loader exists.
//!
//! The host package manager can only resolve plugin code through its
//! generated loader, which is stale until the loader-rebuild event. This
//! loader walks the package's declared namespace-prefix → directory map
//! instead, so "before" hooks can run against files that are on disk but
//! not yet known to the host.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::registry::HookUnitRegistry;
use crate::traits::LifecycleHook;

/// Namespace separator in hook identifiers.
pub const NS_SEPARATOR: char = '.';

/// Type of the hook creation function exported by dynamic hook libraries.
///
/// Hook libraries must export: `extern "C" fn create_hook() -> *mut dyn LifecycleHook`
/// (see the `export_hook!` macro).
pub type CreateHookFn = unsafe extern "C" fn() -> *mut dyn LifecycleHook;

/// Loads hook units from a package's install path into the unit registry.
#[derive(Debug, Default)]
pub struct HookLoader {
    /// Loaded libraries (kept alive for the lifetime of the loader).
    #[cfg(feature = "dynamic")]
    _libraries: Vec<libloading::Library>,
}

impl HookLoader {
    /// Creates a new hook loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the hook unit for `hook_id`, registering it into `registry`.
    ///
    /// Returns `true` when the unit is loaded afterwards (including the case
    /// where it already was). Absence of a hook file is a legitimate
    /// configuration and reports `false` without raising; callers invoking
    /// this after the package's files were removed simply get `false`.
    pub fn load(
        &mut self,
        registry: &mut HookUnitRegistry,
        hook_id: &str,
        source_roots: &BTreeMap<String, String>,
        install_path: &Path,
    ) -> bool {
        if registry.contains(hook_id) {
            return true;
        }

        let Some(candidate) = resolve_hook_path(hook_id, source_roots, install_path) else {
            debug!(hook = %hook_id, path = %install_path.display(), "No hook unit file on disk, skipping");
            return false;
        };

        self.load_candidate(registry, hook_id, &candidate)
    }

    /// Loads a hook library from a resolved candidate path.
    #[cfg(feature = "dynamic")]
    fn load_candidate(
        &mut self,
        registry: &mut HookUnitRegistry,
        hook_id: &str,
        path: &Path,
    ) -> bool {
        use std::sync::Arc;

        use tracing::{info, warn};

        // SAFETY: hook libraries are trusted plugin code installed by the
        // host package manager; the entry symbol contract is fixed by
        // `export_hook!`.
        unsafe {
            let library = match libloading::Library::new(path) {
                Ok(lib) => lib,
                Err(e) => {
                    warn!(
                        hook = %hook_id,
                        path = %path.display(),
                        error = %e,
                        "Failed to load hook library"
                    );
                    return false;
                }
            };

            let create_fn: libloading::Symbol<CreateHookFn> = match library.get(b"create_hook") {
                Ok(sym) => sym,
                Err(e) => {
                    warn!(
                        hook = %hook_id,
                        path = %path.display(),
                        error = %e,
                        "Hook library missing 'create_hook' symbol"
                    );
                    return false;
                }
            };

            let unit: Box<dyn LifecycleHook> = Box::from_raw(create_fn());
            registry.register(hook_id, Arc::from(unit));
            self._libraries.push(library);

            info!(hook = %hook_id, path = %path.display(), "Hook unit loaded");
            true
        }
    }

    #[cfg(not(feature = "dynamic"))]
    fn load_candidate(
        &mut self,
        _registry: &mut HookUnitRegistry,
        hook_id: &str,
        path: &Path,
    ) -> bool {
        debug!(
            hook = %hook_id,
            path = %path.display(),
            "Hook unit file found but dynamic loading is disabled"
        );
        false
    }
}

/// Resolves a hook identifier to an on-disk candidate file.
///
/// Scans the declared namespace-prefix → directory map; for each entry
/// whose prefix matches `hook_id` at a namespace boundary, the remaining
/// suffix is translated to a relative path (separators become directory
/// separators, the platform dynamic-library extension is appended) under
/// the mapped subdirectory of the install path. The first candidate that
/// exists on disk wins.
pub fn resolve_hook_path(
    hook_id: &str,
    source_roots: &BTreeMap<String, String>,
    install_path: &Path,
) -> Option<PathBuf> {
    for (prefix, dir) in source_roots {
        let Some(suffix) = strip_namespace_prefix(hook_id, prefix) else {
            continue;
        };

        let relative = format!(
            "{}.{}",
            suffix.replace(NS_SEPARATOR, "/"),
            std::env::consts::DLL_EXTENSION
        );
        let candidate = install_path.join(dir).join(relative);
        if candidate.exists() {
            return Some(candidate);
        }
    }

    None
}

/// Strips `prefix` from `hook_id`, requiring a namespace boundary and a
/// non-empty remainder.
fn strip_namespace_prefix<'a>(hook_id: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = hook_id.strip_prefix(prefix)?;
    let rest = if prefix.ends_with(NS_SEPARATOR) {
        rest
    } else {
        rest.strip_prefix(NS_SEPARATOR)?
    };
    (!rest.is_empty()).then_some(rest)
}
