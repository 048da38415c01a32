//! Process table adapter backed by sysinfo.

use std::ffi::OsStr;
use std::path::Path;

use parking_lot::Mutex;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::error::{Error, Result};
use crate::ports::ProcessTablePort;

/// Process-table queries via a shared `sysinfo::System` snapshot.
///
/// Every query refreshes before reading, so results reflect the live table.
/// `kill` sends the platform's forceful termination (SIGKILL on Unix,
/// `TerminateProcess` on Windows).
pub struct SysinfoProcessTable {
    system: Mutex<System>,
}

impl SysinfoProcessTable {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SysinfoProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTablePort for SysinfoProcessTable {
    fn pids_by_name(&self, name: &str) -> Vec<u32> {
        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::All, true);
        system
            .processes()
            .iter()
            .filter(|(_, process)| name_matches(process.name(), name))
            .map(|(pid, _)| pid.as_u32())
            .collect()
    }

    fn is_pid_alive(&self, pid: u32) -> bool {
        let pid = Pid::from_u32(pid);
        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).is_some()
    }

    fn kill(&self, pid: u32) -> Result<bool> {
        let sys_pid = Pid::from_u32(pid);
        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::Some(&[sys_pid]), true);
        match system.process(sys_pid) {
            Some(process) if process.kill() => Ok(true),
            Some(_) => Err(Error::Terminate {
                pid,
                reason: "kill signal could not be delivered".to_string(),
            }),
            // Already gone: nothing left to terminate.
            None => Ok(false),
        }
    }
}

/// Compare a process-table entry against the derived process name, ignoring
/// the entry's extension and ASCII case (`nginx` matches `nginx.exe`).
fn name_matches(entry: &OsStr, wanted: &str) -> bool {
    let stem = Path::new(entry).file_stem().unwrap_or(entry);
    stem.eq_ignore_ascii_case(wanted)
}
