//! End-to-end orchestrator behavior over host event sequences.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use hooklift_core::AppError;
use hooklift_core::AppResult;
use hooklift_core::events::PackageEvent;
use hooklift_core::traits::{HostRuntime, InstalledPluginStore};
use hooklift_core::types::{NewInstalledPlugin, PackageExtra, PackageManifest};
use hooklift_hooks::{HookContext, HookOrchestrator, LifecycleHook};
use hooklift_store::MemoryStore;

/// A call trace shared between test hooks and assertions.
type CallLog = Arc<Mutex<Vec<(String, HookContext)>>>;

#[derive(Debug)]
struct RecordingHook {
    label: &'static str,
    calls: CallLog,
    fail_method: Option<&'static str>,
}

impl RecordingHook {
    fn new(label: &'static str, calls: &CallLog) -> Self {
        Self {
            label,
            calls: calls.clone(),
            fail_method: None,
        }
    }

    fn failing_on(label: &'static str, calls: &CallLog, method: &'static str) -> Self {
        Self {
            label,
            calls: calls.clone(),
            fail_method: Some(method),
        }
    }

    fn record(&self, method: &str, ctx: &HookContext) -> Result<(), String> {
        self.calls
            .lock()
            .unwrap()
            .push((format!("{}:{}:{}", self.label, method, ctx.name), ctx.clone()));
        if self.fail_method == Some(method) {
            Err("needs v2 feature X".to_string())
        } else {
            Ok(())
        }
    }
}

impl LifecycleHook for RecordingHook {
    fn before_install(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("before_install", ctx)
    }

    fn after_install(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("after_install", ctx)
    }

    fn before_update(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("before_update", ctx)
    }

    fn after_update(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("after_update", ctx)
    }

    fn before_uninstall(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("before_uninstall", ctx)
    }

    fn after_uninstall(&self, ctx: &HookContext) -> Result<(), String> {
        self.record("after_uninstall", ctx)
    }
}

#[derive(Debug)]
struct StubRuntime {
    startups: Arc<AtomicUsize>,
    fail: bool,
}

impl StubRuntime {
    fn working(startups: &Arc<AtomicUsize>) -> Box<Self> {
        Box::new(Self {
            startups: startups.clone(),
            fail: false,
        })
    }

    fn broken() -> Box<Self> {
        Box::new(Self {
            startups: Arc::new(AtomicUsize::new(0)),
            fail: true,
        })
    }
}

impl HostRuntime for StubRuntime {
    fn load_generated_loader(&self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::internal("generated loader missing"));
        }
        Ok(())
    }

    fn bootstrap(&self) -> AppResult<()> {
        Ok(())
    }

    fn startup(&self) -> AppResult<()> {
        self.startups.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn manifest(name: &str, version: &str, hook: Option<&str>) -> PackageManifest {
    PackageManifest {
        name: name.to_string(),
        version: version.to_string(),
        package_type: "hooklift-plugin".to_string(),
        install_path: PathBuf::from("/opt").join(name),
        extra: PackageExtra {
            hook: hook.map(str::to_string),
            source_roots: Default::default(),
        },
    }
}

fn widgets(version: &str) -> PackageManifest {
    manifest("acme/widgets", version, Some("acme.widgets.WidgetHook"))
}

fn call_names(calls: &CallLog) -> Vec<String> {
    calls.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
}

fn new_orchestrator() -> (HookOrchestrator, Arc<AtomicUsize>) {
    let startups = Arc::new(AtomicUsize::new(0));
    let orchestrator = HookOrchestrator::new(
        Box::new(MemoryStore::new()),
        StubRuntime::working(&startups),
    );
    (orchestrator, startups)
}

#[test]
fn ineligible_packages_are_ignored_at_every_phase() {
    let calls = CallLog::default();
    let (mut orchestrator, _) = new_orchestrator();
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    let library = manifest("acme/library", "3.0.0", Some("acme.widgets.WidgetHook"));
    for event in [
        PackageEvent::PreInstall { package: library.clone() },
        PackageEvent::PostInstall { package: library.clone() },
        PackageEvent::PreUninstall { package: library.clone() },
        PackageEvent::PostUninstall { package: library },
        PackageEvent::LoaderRebuild,
    ] {
        orchestrator.handle(&event).unwrap();
    }

    assert!(call_names(&calls).is_empty());
    assert!(orchestrator.store().list().unwrap().is_empty());
}

#[test]
fn install_runs_before_then_deferred_after_then_registry_add() {
    let calls = CallLog::default();
    let (mut orchestrator, _) = new_orchestrator();
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    let package = widgets("1.2.0");
    orchestrator
        .handle(&PackageEvent::PreInstall { package: package.clone() })
        .unwrap();

    // Nothing deferred has run yet, and the registry is untouched.
    assert_eq!(call_names(&calls), ["hook:before_install:acme/widgets"]);

    orchestrator
        .handle(&PackageEvent::PostInstall { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    assert_eq!(
        call_names(&calls),
        [
            "hook:before_install:acme/widgets",
            "hook:after_install:acme/widgets",
        ]
    );

    let contexts = calls.lock().unwrap();
    for (_, ctx) in contexts.iter() {
        assert_eq!(ctx.version.as_deref(), Some("1.2.0"));
        assert_eq!(ctx.path, PathBuf::from("/opt/acme/widgets"));
    }
    drop(contexts);

    let records = orchestrator.store().list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "acme/widgets");
    assert_eq!(records[0].version, "1.2.0");
    assert_eq!(records[0].package_type, "hooklift-plugin");
}

#[test]
fn before_install_failure_vetoes_the_package() {
    let calls = CallLog::default();
    let (mut orchestrator, _) = new_orchestrator();
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::failing_on("hook", &calls, "before_install")),
    );

    let err = orchestrator
        .handle(&PackageEvent::PreInstall { package: widgets("1.2.0") })
        .unwrap_err();
    assert!(err.message.contains("needs v2 feature X"));

    // The host aborts the operation, so no post event arrives. The rebuild
    // finds nothing pending for the package.
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    assert_eq!(call_names(&calls), ["hook:before_install:acme/widgets"]);
    assert!(orchestrator.store().list().unwrap().is_empty());
}

#[test]
fn after_hooks_require_a_prior_post_event() {
    let calls = CallLog::default();
    let (mut orchestrator, _) = new_orchestrator();
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    orchestrator
        .handle(&PackageEvent::PreInstall { package: widgets("1.2.0") })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    assert_eq!(call_names(&calls), ["hook:before_install:acme/widgets"]);
    assert!(orchestrator.store().list().unwrap().is_empty());
}

#[test]
fn uninstall_prefers_the_instance_captured_before_removal() {
    let calls = CallLog::default();
    let startups = Arc::new(AtomicUsize::new(0));

    let mut seeded = MemoryStore::new();
    seeded
        .add(NewInstalledPlugin {
            name: "acme/widgets".to_string(),
            version: "1.2.0".to_string(),
            package_type: "hooklift-plugin".to_string(),
            path: PathBuf::from("/opt/acme/widgets"),
        })
        .unwrap();

    let mut orchestrator =
        HookOrchestrator::new(Box::new(seeded), StubRuntime::working(&startups));
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("captured", &calls)),
    );

    let package = widgets("1.2.0");
    orchestrator
        .handle(&PackageEvent::PreUninstall { package: package.clone() })
        .unwrap();

    // Simulate the loader state after file removal: whatever resolves now
    // is not the unit that existed at pre-uninstall time.
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("late", &calls)),
    );

    orchestrator
        .handle(&PackageEvent::PostUninstall { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    assert_eq!(
        call_names(&calls),
        [
            "captured:before_uninstall:acme/widgets",
            "captured:after_uninstall:acme/widgets",
        ]
    );

    // Uninstall contexts carry no version.
    for (_, ctx) in calls.lock().unwrap().iter() {
        assert_eq!(ctx.version, None);
    }

    assert!(orchestrator.store().list().unwrap().is_empty());
}

#[test]
fn update_boots_the_runtime_before_the_before_hook() {
    let calls = CallLog::default();
    let startups = Arc::new(AtomicUsize::new(0));

    let mut seeded = MemoryStore::new();
    seeded
        .add(NewInstalledPlugin {
            name: "acme/widgets".to_string(),
            version: "1.0.0".to_string(),
            package_type: "hooklift-plugin".to_string(),
            path: PathBuf::from("/opt/acme/widgets"),
        })
        .unwrap();

    let mut orchestrator =
        HookOrchestrator::new(Box::new(seeded), StubRuntime::working(&startups));
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    let package = widgets("1.2.0");
    orchestrator
        .handle(&PackageEvent::PreUpdate { package: package.clone() })
        .unwrap();
    assert_eq!(startups.load(Ordering::SeqCst), 1);

    orchestrator
        .handle(&PackageEvent::PostUpdate { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    // The runtime boots at most once per invocation.
    assert_eq!(startups.load(Ordering::SeqCst), 1);
    assert_eq!(
        call_names(&calls),
        [
            "hook:before_update:acme/widgets",
            "hook:after_update:acme/widgets",
        ]
    );

    let records = orchestrator.store().list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].version, "1.2.0");
}

#[test]
fn bootstrap_failure_degrades_but_never_aborts_the_batch() {
    let calls = CallLog::default();
    let mut orchestrator =
        HookOrchestrator::new(Box::new(MemoryStore::new()), StubRuntime::broken());
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    let package = widgets("1.2.0");
    orchestrator
        .handle(&PackageEvent::PreInstall { package: package.clone() })
        .unwrap();
    orchestrator
        .handle(&PackageEvent::PostInstall { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    assert_eq!(
        call_names(&calls),
        [
            "hook:before_install:acme/widgets",
            "hook:after_install:acme/widgets",
        ]
    );
    assert_eq!(orchestrator.store().list().unwrap().len(), 1);
}

#[test]
fn failing_after_hook_stops_its_own_mapping_only() {
    let calls = CallLog::default();
    let startups = Arc::new(AtomicUsize::new(0));

    let mut seeded = MemoryStore::new();
    seeded
        .add(NewInstalledPlugin {
            name: "acme/tools".to_string(),
            version: "1.0.0".to_string(),
            package_type: "hooklift-plugin".to_string(),
            path: PathBuf::from("/opt/acme/tools"),
        })
        .unwrap();

    let mut orchestrator =
        HookOrchestrator::new(Box::new(seeded), StubRuntime::working(&startups));
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::failing_on("widgets", &calls, "after_install")),
    );
    orchestrator.register_hook(
        "acme.gears.GearHook",
        Arc::new(RecordingHook::new("gears", &calls)),
    );
    orchestrator.register_hook(
        "acme.tools.ToolHook",
        Arc::new(RecordingHook::new("tools", &calls)),
    );

    let widgets_pkg = widgets("1.2.0");
    let gears = manifest("acme/gears", "2.0.0", Some("acme.gears.GearHook"));
    let tools = manifest("acme/tools", "1.1.0", Some("acme.tools.ToolHook"));

    for event in [
        PackageEvent::PreInstall { package: widgets_pkg.clone() },
        PackageEvent::PostInstall { package: widgets_pkg },
        PackageEvent::PreInstall { package: gears.clone() },
        PackageEvent::PostInstall { package: gears },
        PackageEvent::PreUpdate { package: tools.clone() },
        PackageEvent::PostUpdate { package: tools },
    ] {
        orchestrator.handle(&event).unwrap();
    }

    let err = orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap_err();
    assert!(err.message.contains("acme/widgets"));

    let names = call_names(&calls);
    // The failing entry ran; the rest of the install mapping did not; the
    // update mapping still ran.
    assert!(names.contains(&"widgets:after_install:acme/widgets".to_string()));
    assert!(!names.iter().any(|n| n == "gears:after_install:acme/gears"));
    assert!(names.contains(&"tools:after_update:acme/tools".to_string()));

    let records = orchestrator.store().list().unwrap();
    assert!(!records.iter().any(|r| r.name == "acme/widgets"));
    assert!(!records.iter().any(|r| r.name == "acme/gears"));
    let tools_record = records.iter().find(|r| r.name == "acme/tools").unwrap();
    assert_eq!(tools_record.version, "1.1.0");
}

#[test]
fn rebuild_with_nothing_pending_is_a_fast_noop() {
    let (mut orchestrator, startups) = new_orchestrator();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();
    assert_eq!(startups.load(Ordering::SeqCst), 0);
}

#[test]
fn hookless_plugins_are_still_tracked_in_the_registry() {
    let (mut orchestrator, _) = new_orchestrator();

    let package = manifest("acme/plain", "0.1.0", None);
    orchestrator
        .handle(&PackageEvent::PreInstall { package: package.clone() })
        .unwrap();
    orchestrator
        .handle(&PackageEvent::PostInstall { package: package.clone() })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();
    assert_eq!(orchestrator.store().list().unwrap().len(), 1);

    orchestrator
        .handle(&PackageEvent::PreUninstall { package: package.clone() })
        .unwrap();
    orchestrator
        .handle(&PackageEvent::PostUninstall { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();
    assert!(orchestrator.store().list().unwrap().is_empty());
}

#[test]
fn repeated_post_events_for_one_package_run_the_after_hook_once() {
    let calls = CallLog::default();
    let (mut orchestrator, _) = new_orchestrator();
    orchestrator.register_hook(
        "acme.widgets.WidgetHook",
        Arc::new(RecordingHook::new("hook", &calls)),
    );

    let package = widgets("1.2.0");
    orchestrator
        .handle(&PackageEvent::PostInstall { package: package.clone() })
        .unwrap();
    orchestrator
        .handle(&PackageEvent::PostInstall { package })
        .unwrap();
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();

    let after_calls = call_names(&calls)
        .into_iter()
        .filter(|n| n.contains("after_install"))
        .count();
    assert_eq!(after_calls, 1);
    assert_eq!(orchestrator.store().list().unwrap().len(), 1);

    // A second rebuild finds the mappings already drained.
    orchestrator.handle(&PackageEvent::LoaderRebuild).unwrap();
    assert_eq!(orchestrator.store().list().unwrap().len(), 1);
}
