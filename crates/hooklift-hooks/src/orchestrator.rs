//! Hook orchestrator — maps host package-manager events to hook calls.
//!
//! Per package and operation kind the conceptual state machine is:
//!
//! ```text
//! IDLE -> (pre event) -> BEFORE-HOOK-RUN -> (post event) -> PENDING-AFTER
//!      -> (loader-rebuild) -> AFTER-HOOK-RUN -> IDLE
//! ```
//!
//! "Before" hooks run synchronously, loading the hook unit manually because
//! the host's generated loader does not know the package yet. "After" hooks
//! are deferred until the loader-rebuild event, the single synchronization
//! point where the batch's pending entries drain and the installed-plugin
//! registry is written.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use hooklift_core::events::PackageEvent;
use hooklift_core::traits::{HostRuntime, InstalledPluginStore};
use hooklift_core::types::{NewInstalledPlugin, PackageManifest, PluginDescriptor};
use hooklift_core::{AppError, AppResult};

use crate::definitions::{HookContext, HookMethod};
use crate::eligibility::EligibilityResolver;
use crate::invoker::HookInvoker;
use crate::loader::HookLoader;
use crate::pending::{PendingEntry, PendingOperations};
use crate::registry::HookUnitRegistry;
use crate::runtime::RuntimeBootstrapper;
use crate::traits::LifecycleHook;

/// Orchestrates lifecycle hooks for one package-manager invocation.
///
/// Construct one instance per invocation and discard it afterwards; the
/// pending mappings, the preloaded-instance cache, and the runtime-ready
/// flag are scoped to the instance.
#[derive(Debug)]
pub struct HookOrchestrator {
    /// Decides which packages are subject to hooks.
    resolver: EligibilityResolver,
    /// Per-package pending state across the batch.
    pending: PendingOperations,
    /// Hook units loaded in this process.
    units: HookUnitRegistry,
    /// Manual hook loader.
    loader: HookLoader,
    /// Lifecycle method dispatcher.
    invoker: HookInvoker,
    /// Lazy host environment bring-up.
    bootstrapper: RuntimeBootstrapper,
    /// Hook instances captured at pre-uninstall, keyed by package name.
    preloaded: HashMap<String, Arc<dyn LifecycleHook>>,
    /// External installed-plugin record store.
    store: Box<dyn InstalledPluginStore>,
    /// Batch identity, carried in log fields.
    batch_id: Uuid,
}

impl HookOrchestrator {
    /// Creates an orchestrator with the default plugin type sentinel.
    pub fn new(store: Box<dyn InstalledPluginStore>, runtime: Box<dyn HostRuntime>) -> Self {
        Self::with_plugin_type(crate::eligibility::DEFAULT_PLUGIN_TYPE, store, runtime)
    }

    /// Creates an orchestrator with a custom plugin type sentinel.
    pub fn with_plugin_type(
        plugin_type: impl Into<String>,
        store: Box<dyn InstalledPluginStore>,
        runtime: Box<dyn HostRuntime>,
    ) -> Self {
        let batch_id = Uuid::new_v4();
        debug!(batch = %batch_id, "Hook orchestrator created");

        Self {
            resolver: EligibilityResolver::new(plugin_type),
            pending: PendingOperations::new(),
            units: HookUnitRegistry::new(),
            loader: HookLoader::new(),
            invoker: HookInvoker::new(),
            bootstrapper: RuntimeBootstrapper::new(runtime),
            preloaded: HashMap::new(),
            store,
            batch_id,
        }
    }

    /// Registers a compiled-in hook unit under its hook identifier.
    pub fn register_hook(&mut self, hook_id: impl Into<String>, unit: Arc<dyn LifecycleHook>) {
        self.units.register(hook_id, unit);
    }

    /// Returns the installed-plugin store.
    pub fn store(&self) -> &dyn InstalledPluginStore {
        self.store.as_ref()
    }

    /// Handles one host package-manager event.
    pub fn handle(&mut self, event: &PackageEvent) -> AppResult<()> {
        debug!(batch = %self.batch_id, event = %event, "Handling package event");

        match event {
            PackageEvent::PreInstall { package } => self.on_pre_install(package),
            PackageEvent::PostInstall { package } => self.on_post_install(package),
            PackageEvent::PreUpdate { package } => self.on_pre_update(package),
            PackageEvent::PostUpdate { package } => self.on_post_update(package),
            PackageEvent::PreUninstall { package } => self.on_pre_uninstall(package),
            PackageEvent::PostUninstall { package } => self.on_post_uninstall(package),
            PackageEvent::LoaderRebuild => self.on_loader_rebuild(),
        }
    }

    /// Runs `before_install` synchronously. A hook failure vetoes the
    /// installation and propagates to the host.
    fn on_pre_install(&mut self, package: &PackageManifest) -> AppResult<()> {
        let Some(descriptor) = self.resolver.resolve(package) else {
            return Ok(());
        };

        // No runtime boot here: install hooks run against whatever
        // environment already exists.
        if let Some(unit) = self.resolve_unit(&descriptor) {
            let ctx = HookContext::new(
                &descriptor.name,
                &descriptor.version,
                &descriptor.install_path,
            );
            self.invoker
                .invoke(&unit, &descriptor.name, HookMethod::BeforeInstall, &ctx)
                .inspect_err(|e| {
                    error!(
                        batch = %self.batch_id,
                        package = %descriptor.name,
                        error = %e,
                        "before_install rejected the installation; remove the package from the host manifest to proceed"
                    );
                })?;
        }

        Ok(())
    }

    /// Records the pending install. The generated loader is stale, so no
    /// hook runs here.
    fn on_post_install(&mut self, package: &PackageManifest) -> AppResult<()> {
        if let Some(descriptor) = self.resolver.resolve(package) {
            debug!(batch = %self.batch_id, package = %descriptor.name, "Install pending until loader rebuild");
            self.pending.record_install(descriptor);
        }
        Ok(())
    }

    /// Boots the runtime, then runs `before_update` synchronously with full
    /// capability. A hook failure vetoes the update.
    fn on_pre_update(&mut self, package: &PackageManifest) -> AppResult<()> {
        let Some(descriptor) = self.resolver.resolve(package) else {
            return Ok(());
        };

        self.bootstrapper.ensure_ready();

        if let Some(unit) = self.resolve_unit(&descriptor) {
            let ctx = HookContext::new(
                &descriptor.name,
                &descriptor.version,
                &descriptor.install_path,
            );
            self.invoker
                .invoke(&unit, &descriptor.name, HookMethod::BeforeUpdate, &ctx)
                .inspect_err(|e| {
                    error!(
                        batch = %self.batch_id,
                        package = %descriptor.name,
                        error = %e,
                        "before_update rejected the update"
                    );
                })?;
        }

        Ok(())
    }

    /// Records the pending update.
    fn on_post_update(&mut self, package: &PackageManifest) -> AppResult<()> {
        if let Some(descriptor) = self.resolver.resolve(package) {
            debug!(batch = %self.batch_id, package = %descriptor.name, "Update pending until loader rebuild");
            self.pending.record_update(descriptor);
        }
        Ok(())
    }

    /// Captures the hook instance before the package's files vanish, runs
    /// `before_uninstall`, and records the pending uninstall.
    fn on_pre_uninstall(&mut self, package: &PackageManifest) -> AppResult<()> {
        let Some(descriptor) = self.resolver.resolve(package) else {
            return Ok(());
        };

        // The files are gone at the uninstall boundary; whatever is not
        // captured now cannot be loaded later.
        if let Some(unit) = self.resolve_unit(&descriptor) {
            self.preloaded.insert(descriptor.name.clone(), unit);
        }

        self.bootstrapper.ensure_ready();

        if let Some(unit) = self.preloaded.get(&descriptor.name).cloned() {
            let ctx = HookContext::without_version(&descriptor.name, &descriptor.install_path);
            self.invoker
                .invoke(&unit, &descriptor.name, HookMethod::BeforeUninstall, &ctx)
                .inspect_err(|e| {
                    error!(
                        batch = %self.batch_id,
                        package = %descriptor.name,
                        error = %e,
                        "before_uninstall rejected the removal"
                    );
                })?;
        }

        // Recorded regardless of hook presence: the registry removal still
        // has to happen at the rebuild point.
        self.pending.record_uninstall(descriptor);
        Ok(())
    }

    /// The pending uninstall entry was recorded at pre-uninstall, while the
    /// hook file still existed. Nothing left to do here.
    fn on_post_uninstall(&mut self, package: &PackageManifest) -> AppResult<()> {
        if let Some(descriptor) = self.resolver.resolve(package) {
            debug!(batch = %self.batch_id, package = %descriptor.name, "Uninstall acknowledged");
        }
        Ok(())
    }

    /// The single synchronization point: drains all pending entries, runs
    /// the deferred "after" hooks, and persists outcomes to the
    /// installed-plugin store.
    fn on_loader_rebuild(&mut self) -> AppResult<()> {
        if self.pending.is_empty() {
            debug!(batch = %self.batch_id, "Nothing pending at loader rebuild");
            return Ok(());
        }

        // Best effort: a failed bring-up degrades capability, it does not
        // abort the batch.
        self.bootstrapper.ensure_ready();

        let installs = self.pending.drain_installs();
        let updates = self.pending.drain_updates();
        let uninstalls = self.pending.drain_uninstalls();

        info!(
            batch = %self.batch_id,
            installs = installs.len(),
            updates = updates.len(),
            uninstalls = uninstalls.len(),
            "Running deferred lifecycle hooks"
        );

        // A failing entry aborts the rest of its own mapping; the other
        // mappings are independent package sets and still run. The first
        // error is reported to the host afterwards.
        let results = [
            self.finish_installs(installs),
            self.finish_updates(updates),
            self.finish_uninstalls(uninstalls),
        ];

        self.preloaded.clear();

        for result in results {
            result?;
        }
        Ok(())
    }

    fn finish_installs(&mut self, entries: Vec<PendingEntry>) -> AppResult<()> {
        for entry in entries {
            let descriptor = entry.descriptor;

            if let Some(unit) = self.resolve_unit(&descriptor) {
                let ctx = HookContext::new(
                    &descriptor.name,
                    &descriptor.version,
                    &descriptor.install_path,
                );
                self.invoker
                    .invoke(&unit, &descriptor.name, HookMethod::AfterInstall, &ctx)
                    .map_err(|e| self.deferred_failure(&descriptor, e))?;
            }

            self.store.add(NewInstalledPlugin {
                name: descriptor.name,
                version: descriptor.version,
                package_type: self.resolver.plugin_type().to_string(),
                path: descriptor.install_path,
            })?;
        }
        Ok(())
    }

    fn finish_updates(&mut self, entries: Vec<PendingEntry>) -> AppResult<()> {
        for entry in entries {
            let descriptor = entry.descriptor;

            if let Some(unit) = self.resolve_unit(&descriptor) {
                let ctx = HookContext::new(
                    &descriptor.name,
                    &descriptor.version,
                    &descriptor.install_path,
                );
                self.invoker
                    .invoke(&unit, &descriptor.name, HookMethod::AfterUpdate, &ctx)
                    .map_err(|e| self.deferred_failure(&descriptor, e))?;
            }

            self.store.update(&descriptor.name, &descriptor.version)?;
        }
        Ok(())
    }

    fn finish_uninstalls(&mut self, entries: Vec<PendingEntry>) -> AppResult<()> {
        for entry in entries {
            let descriptor = entry.descriptor;

            // Prefer the instance captured at pre-uninstall; a load from
            // disk would silently find nothing now.
            let unit = self
                .preloaded
                .remove(&descriptor.name)
                .or_else(|| self.resolve_unit(&descriptor));

            if let Some(unit) = unit {
                let ctx = HookContext::without_version(&descriptor.name, &descriptor.install_path);
                self.invoker
                    .invoke(&unit, &descriptor.name, HookMethod::AfterUninstall, &ctx)
                    .map_err(|e| self.deferred_failure(&descriptor, e))?;
            }

            self.store.remove(&descriptor.name)?;
        }
        Ok(())
    }

    /// Resolves a hook unit: already-loaded first, manual load otherwise.
    fn resolve_unit(&mut self, descriptor: &PluginDescriptor) -> Option<Arc<dyn LifecycleHook>> {
        let hook_id = descriptor.hook.as_deref()?;
        self.loader.load(
            &mut self.units,
            hook_id,
            &descriptor.source_roots,
            &descriptor.install_path,
        );
        self.units.get(hook_id)
    }

    fn deferred_failure(&self, descriptor: &PluginDescriptor, error: AppError) -> AppError {
        error!(
            batch = %self.batch_id,
            package = %descriptor.name,
            error = %error,
            "Deferred hook failed; remaining entries in this mapping are skipped"
        );
        error
    }
}
