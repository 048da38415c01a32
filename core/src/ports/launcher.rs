//! Process launcher port (interface).

use crate::domain::LaunchRequest;
use crate::error::Result;

/// Port for spawning child processes.
///
/// Implementations run the child without a visible window and without shell
/// interpretation, with stdout/stderr captured and discarded.
pub trait ProcessLauncherPort: Send + Sync {
    /// Spawn the process described by `request`.
    ///
    /// Returns the child's PID for a fire-and-forget launch, or `None` after
    /// a synchronous wait (the child has already exited). A hung child during
    /// a waited launch blocks the caller indefinitely.
    fn launch(
        &self,
        request: &LaunchRequest,
    ) -> impl std::future::Future<Output = Result<Option<u32>>> + Send;
}
