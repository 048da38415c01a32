//! Managed service description.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque routing tag grouping log lines by the service they pertain to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogSection(String);

impl LogSection {
    /// Create a new log section tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogSection {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

/// Configuration for one managed service process.
///
/// The executable path and the process name derived from it are fixed at
/// construction. The process name is the executable's filename without its
/// extension and is the lookup key for process-table enumeration; it is
/// derived exactly once and never recomputed.
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    executable: PathBuf,
    process_name: String,
    section: LogSection,

    /// Arguments passed to the start invocation.
    pub start_args: Option<String>,
    /// Arguments for the optional graceful-stop invocation. When set, `stop`
    /// runs the executable with these arguments and waits for it to exit
    /// before any forceful termination.
    pub stop_args: Option<String>,
    /// Directory holding the service's configuration files.
    pub config_dir: Option<PathBuf>,
    /// Directory the service writes its own logs to.
    pub log_dir: Option<PathBuf>,
    /// Working directory for launches. Falls back to the supervisor's
    /// startup directory when unset.
    pub working_dir: Option<PathBuf>,
    /// Extra environment variables added to the child's environment.
    pub env: HashMap<String, String>,
}

impl ServiceSpec {
    /// Create a spec for the given executable. The executable is not
    /// validated here; a missing binary surfaces as a launch error.
    pub fn new(executable: impl Into<PathBuf>, section: LogSection) -> Self {
        let executable = executable.into();
        let process_name = derive_process_name(&executable);
        Self {
            executable,
            process_name,
            section,
            start_args: None,
            stop_args: None,
            config_dir: None,
            log_dir: None,
            working_dir: None,
            env: HashMap::new(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// The process-table lookup key for this service.
    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn section(&self) -> &LogSection {
        &self.section
    }
}

/// Filename of the executable without its extension.
///
/// Splits on both separator styles so a Windows-style path in a config file
/// still yields the right name on Unix hosts.
fn derive_process_name(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let file_name = raw.rsplit(['/', '\\']).next().unwrap_or(&raw);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}
