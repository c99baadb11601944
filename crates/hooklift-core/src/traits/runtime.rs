//! Host application runtime boundary.

use crate::result::AppResult;

/// Opaque interface to the host application environment.
///
/// The engine treats the host runtime as an environment-readiness switch:
/// it never inspects what the steps do, only whether they succeed. The
/// three steps run in order, once per process invocation, the first time an
/// "after" hook needs full capability.
pub trait HostRuntime: Send + std::fmt::Debug {
    /// Executes the host's generated dependency loader.
    fn load_generated_loader(&self) -> AppResult<()>;

    /// Executes the host application's bootstrap entry point.
    fn bootstrap(&self) -> AppResult<()>;

    /// Invokes the host application's startup sequence.
    fn startup(&self) -> AppResult<()>;
}
