//! Process table port (interface).

use crate::error::Result;

/// Port over the OS process table.
///
/// Name matching ignores the executable extension, so `nginx` matches a
/// process listed as `nginx.exe`.
pub trait ProcessTablePort: Send + Sync {
    /// PIDs of every running process whose name matches `name`.
    fn pids_by_name(&self, name: &str) -> Vec<u32>;

    /// Whether the given PID is currently alive.
    fn is_pid_alive(&self, pid: u32) -> bool;

    /// Forcefully terminate the given process.
    ///
    /// Returns `Ok(false)` when the process was already gone, and
    /// `Error::Terminate` when the kill request could not be delivered.
    fn kill(&self, pid: u32) -> Result<bool>;
}
