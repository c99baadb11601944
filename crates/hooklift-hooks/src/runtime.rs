//! Runtime bootstrapper — lazy, at-most-once host environment bring-up.

use tracing::{info, warn};

use hooklift_core::AppResult;
use hooklift_core::traits::HostRuntime;

/// Brings up the full host application environment on first demand.
///
/// "After" hooks expect full host capability, but booting the host is
/// expensive and may fail, so it happens at most once per orchestrator
/// lifetime and only when a deferred callback actually needs it. A failed
/// bring-up is reported, not raised: callers run their hooks with a
/// reduced capability set instead of aborting the batch.
#[derive(Debug)]
pub struct RuntimeBootstrapper {
    /// The opaque host environment.
    runtime: Box<dyn HostRuntime>,
    /// Set once the three bring-up steps all succeeded.
    ready: bool,
}

impl RuntimeBootstrapper {
    /// Creates a bootstrapper over the given host runtime.
    pub fn new(runtime: Box<dyn HostRuntime>) -> Self {
        Self {
            runtime,
            ready: false,
        }
    }

    /// Returns whether the host environment is up.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Ensures the host environment is up, reporting readiness.
    ///
    /// No-op once ready. On failure the readiness flag stays unset and the
    /// next call tries again.
    pub fn ensure_ready(&mut self) -> bool {
        if self.ready {
            return true;
        }

        if let Err(e) = self.bring_up() {
            warn!(
                error = %e,
                "Host runtime bring-up failed; after hooks run with reduced capability"
            );
            return false;
        }

        self.ready = true;
        info!("Host runtime booted");
        true
    }

    fn bring_up(&self) -> AppResult<()> {
        self.runtime.load_generated_loader()?;
        self.runtime.bootstrap()?;
        self.runtime.startup()?;
        Ok(())
    }
}
