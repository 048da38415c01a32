//! Child-process launcher adapter.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

use crate::domain::LaunchRequest;
use crate::error::{Error, Result};
use crate::ports::ProcessLauncherPort;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Launcher backed by `tokio::process::Command`.
///
/// The startup directory is supplied explicitly at construction and serves
/// as the working directory for launches that do not name one. Spawned
/// children are not tied to this handle: dropping the child after spawn (or
/// after the awaited wait) releases our side only, the process keeps running.
pub struct TokioLauncher {
    startup_dir: PathBuf,
}

impl TokioLauncher {
    pub fn new(startup_dir: PathBuf) -> Self {
        Self { startup_dir }
    }

    fn command_for(&self, request: &LaunchRequest) -> Command {
        if request.elevated {
            return self.elevated_command(request);
        }

        let mut cmd = Command::new(&request.executable);
        cmd.args(request.argv());
        cmd.current_dir(
            request
                .working_dir
                .as_deref()
                .unwrap_or(&self.startup_dir),
        );
        for (key, value) in &request.env {
            cmd.env(key, value);
        }
        cmd
    }

    /// Elevated launches always run from the startup directory and do not
    /// support environment injection.
    #[cfg(unix)]
    fn elevated_command(&self, request: &LaunchRequest) -> Command {
        let mut cmd = Command::new("sudo");
        cmd.arg("-n").arg(&request.executable);
        cmd.args(request.argv());
        cmd.current_dir(&self.startup_dir);
        cmd
    }

    #[cfg(windows)]
    fn elevated_command(&self, request: &LaunchRequest) -> Command {
        let mut cmd = Command::new("powershell");
        cmd.args(["-NoProfile", "-Command", "Start-Process"]);
        cmd.arg("-FilePath").arg(&request.executable);
        if !request.args.is_empty() {
            cmd.arg("-ArgumentList").arg(&request.args);
        }
        cmd.args(["-Verb", "RunAs"]);
        if request.wait_for_exit {
            cmd.arg("-Wait");
        }
        cmd.current_dir(&self.startup_dir);
        cmd
    }
}

impl ProcessLauncherPort for TokioLauncher {
    async fn launch(&self, request: &LaunchRequest) -> Result<Option<u32>> {
        let mut cmd = self.command_for(request);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let mut child = cmd.spawn().map_err(|e| {
            Error::Launch(format!("{}: {}", request.executable.display(), e))
        })?;

        if request.wait_for_exit {
            child.wait().await?;
            return Ok(None);
        }
        Ok(child.id())
    }
}
