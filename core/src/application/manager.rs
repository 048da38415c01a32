//! Service manager: one controller per configured service.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{SysinfoProcessTable, TokioLauncher, TracingLogSink};
use crate::application::ServiceController;
use crate::config::Config;
use crate::ports::{LogSink, ProcessLauncherPort, ProcessTablePort};

/// Manager wired to the real OS adapters.
pub type OsServiceManager = ServiceManager<TokioLauncher, SysinfoProcessTable, TracingLogSink>;

/// Builds and indexes controllers for every configured service, sharing one
/// set of adapters between them. Controllers for different executables never
/// coordinate; two services pointing at the same executable name would race
/// on the process table, which is the caller's responsibility to avoid.
pub struct ServiceManager<L, T, S> {
    controllers: Vec<ServiceController<L, T, S>>,
}

impl OsServiceManager {
    /// Build a manager over the OS adapters. The startup directory is the
    /// fallback working directory for launches and is passed in explicitly
    /// rather than read from ambient process state.
    pub fn from_config(config: &Config, startup_dir: PathBuf) -> Self {
        Self::with_ports(
            config,
            Arc::new(TokioLauncher::new(startup_dir)),
            Arc::new(SysinfoProcessTable::new()),
            Arc::new(TracingLogSink::new()),
        )
    }
}

impl<L, T, S> ServiceManager<L, T, S>
where
    L: ProcessLauncherPort,
    T: ProcessTablePort,
    S: LogSink,
{
    pub fn with_ports(config: &Config, launcher: Arc<L>, table: Arc<T>, log: Arc<S>) -> Self {
        let controllers = config
            .services
            .iter()
            .map(|entry| {
                ServiceController::new(
                    entry.to_spec(),
                    config.messages.clone(),
                    launcher.clone(),
                    table.clone(),
                    log.clone(),
                )
            })
            .collect();
        Self { controllers }
    }

    /// Look up a controller by service name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ServiceController<L, T, S>> {
        self.controllers
            .iter()
            .find(|c| c.spec().section().as_str().eq_ignore_ascii_case(name))
    }

    /// Controllers in configuration order.
    pub fn controllers(&self) -> &[ServiceController<L, T, S>] {
        &self.controllers
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }
}
