//! Service lifecycle controller.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::domain::{LaunchRequest, ServiceSpec};
use crate::error::{Error, Result};
use crate::messages::Messages;
use crate::ports::{LogSink, ProcessLauncherPort, ProcessTablePort};

/// Delay between stop and start during a restart.
const RESTART_DELAY: Duration = Duration::from_secs(1);

/// Lifecycle operations for one managed service.
///
/// Generic over the launcher, process-table and log ports so tests can
/// inject mocks. Liveness prefers the PID recorded at launch time; when no
/// PID is tracked (or the tracked one has died) it falls back to a
/// name-based process-table lookup, which cannot distinguish the managed
/// process from unrelated processes sharing the name.
///
/// Precondition violations (start while running, stop while stopped) are
/// logged through the sink exactly once and returned as typed errors, so
/// callers can react without parsing logs.
pub struct ServiceController<L, T, S> {
    spec: ServiceSpec,
    messages: Messages,
    launcher: Arc<L>,
    table: Arc<T>,
    log: Arc<S>,
    tracked_pid: RwLock<Option<u32>>,
}

impl<L, T, S> ServiceController<L, T, S>
where
    L: ProcessLauncherPort,
    T: ProcessTablePort,
    S: LogSink,
{
    pub fn new(
        spec: ServiceSpec,
        messages: Messages,
        launcher: Arc<L>,
        table: Arc<T>,
        log: Arc<S>,
    ) -> Self {
        Self {
            spec,
            messages,
            launcher,
            table,
            log,
            tracked_pid: RwLock::new(None),
        }
    }

    pub fn spec(&self) -> &ServiceSpec {
        &self.spec
    }

    /// PID recorded by the most recent successful fire-and-forget start,
    /// if it is still considered live.
    pub fn tracked_pid(&self) -> Option<u32> {
        *self.tracked_pid.read()
    }

    /// Launch the service with its configured start arguments.
    ///
    /// No-op when a live process is found; the launch PID is recorded for
    /// later liveness checks. The "started" notice is only emitted when the
    /// launch actually succeeded.
    pub async fn start(&self) -> Result<()> {
        if self.is_running() {
            self.log
                .error(&self.messages.already_running, self.spec.section());
            return Err(Error::AlreadyRunning {
                service: self.spec.process_name().to_string(),
            });
        }

        let request = LaunchRequest::new(
            self.spec.executable(),
            self.spec.start_args.clone().unwrap_or_default(),
        )
        .working_dir(self.spec.working_dir.clone())
        .env(self.spec.env.clone());

        match self.launcher.launch(&request).await {
            Ok(pid) => {
                *self.tracked_pid.write() = pid;
                self.log.notice(&self.messages.started, self.spec.section());
                Ok(())
            }
            Err(err) => {
                self.log
                    .error(&format!("Start(): {err}"), self.spec.section());
                Err(err)
            }
        }
    }

    /// Stop the service: optional graceful invocation first, then forceful
    /// termination of every process-table match for the derived name.
    pub async fn stop(&self) -> Result<()> {
        if !self.is_running() {
            self.log
                .error(&self.messages.not_running, self.spec.section());
            return Err(Error::NotRunning {
                service: self.spec.process_name().to_string(),
            });
        }

        match self.shutdown().await {
            Ok(()) => {
                self.log.notice(&self.messages.stopped, self.spec.section());
                Ok(())
            }
            Err(err) => {
                self.log
                    .error(&format!("Stop(): {err}"), self.spec.section());
                Err(err)
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        if let Some(stop_args) = self.spec.stop_args.clone() {
            // Graceful hook: run the executable with its stop arguments and
            // wait for that invocation to exit before any termination.
            let request = LaunchRequest::new(self.spec.executable(), stop_args)
                .working_dir(self.spec.working_dir.clone())
                .wait_for_exit(true);
            self.launcher.launch(&request).await?;
        }

        for pid in self.table.pids_by_name(self.spec.process_name()) {
            self.table.kill(pid)?;
        }
        *self.tracked_pid.write() = None;
        Ok(())
    }

    /// Stop, a fixed delay, then start.
    ///
    /// Inner failures are already logged by the individual operations and do
    /// not stop the sequence; the "restarted" notice is emitted
    /// unconditionally.
    pub async fn restart(&self) {
        let _ = self.stop().await;
        tokio::time::sleep(RESTART_DELAY).await;
        let _ = self.start().await;
        self.log
            .notice(&self.messages.restarted, self.spec.section());
    }

    /// Whether a process for this service is currently running.
    pub fn is_running(&self) -> bool {
        // Copy the option out so the read guard is released before the
        // write below; the lock is not reentrant.
        let tracked = *self.tracked_pid.read();
        if let Some(pid) = tracked {
            if self.table.is_pid_alive(pid) {
                return true;
            }
            // Tracked process died; forget it and fall back to name lookup.
            *self.tracked_pid.write() = None;
        }
        !self.table.pids_by_name(self.spec.process_name()).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use parking_lot::Mutex;

    use crate::domain::LogSection;

    /// Launcher mock recording every request, with optional forced failure.
    struct MockLauncher {
        requests: Mutex<Vec<LaunchRequest>>,
        fail: bool,
        next_pid: Option<u32>,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl MockLauncher {
        fn new(events: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail: false,
                next_pid: None,
                events,
            }
        }

        fn failing(events: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                fail: true,
                ..Self::new(events)
            }
        }

        fn with_pid(events: Arc<Mutex<Vec<String>>>, pid: u32) -> Self {
            Self {
                next_pid: Some(pid),
                ..Self::new(events)
            }
        }

        fn requests(&self) -> Vec<LaunchRequest> {
            self.requests.lock().clone()
        }
    }

    impl ProcessLauncherPort for MockLauncher {
        async fn launch(&self, request: &LaunchRequest) -> Result<Option<u32>> {
            self.events.lock().push(format!("launch {}", request.args));
            self.requests.lock().push(request.clone());
            if self.fail {
                return Err(Error::Launch("spawn failure".to_string()));
            }
            if request.wait_for_exit {
                Ok(None)
            } else {
                Ok(self.next_pid)
            }
        }
    }

    /// Process-table mock: `pids` are the current name matches, `alive`
    /// answers tracked-PID liveness checks.
    struct MockTable {
        pids: Mutex<Vec<u32>>,
        alive: Mutex<HashSet<u32>>,
        killed: Mutex<Vec<u32>>,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl MockTable {
        fn new(events: Arc<Mutex<Vec<String>>>, pids: Vec<u32>) -> Self {
            Self {
                pids: Mutex::new(pids),
                alive: Mutex::new(HashSet::new()),
                killed: Mutex::new(Vec::new()),
                events,
            }
        }

        fn killed(&self) -> Vec<u32> {
            self.killed.lock().clone()
        }
    }

    impl ProcessTablePort for MockTable {
        fn pids_by_name(&self, _name: &str) -> Vec<u32> {
            self.pids.lock().clone()
        }

        fn is_pid_alive(&self, pid: u32) -> bool {
            self.alive.lock().contains(&pid)
        }

        fn kill(&self, pid: u32) -> Result<bool> {
            self.events.lock().push(format!("kill {pid}"));
            self.killed.lock().push(pid);
            self.pids.lock().retain(|p| *p != pid);
            Ok(true)
        }
    }

    /// Log sink recording (kind, message, section) triples.
    #[derive(Default)]
    struct RecordingLog {
        entries: Mutex<Vec<(&'static str, String, String)>>,
    }

    impl RecordingLog {
        fn errors(&self) -> Vec<String> {
            self.entries
                .lock()
                .iter()
                .filter(|(kind, _, _)| *kind == "error")
                .map(|(_, message, _)| message.clone())
                .collect()
        }

        fn notices(&self) -> Vec<String> {
            self.entries
                .lock()
                .iter()
                .filter(|(kind, _, _)| *kind == "notice")
                .map(|(_, message, _)| message.clone())
                .collect()
        }
    }

    impl LogSink for RecordingLog {
        fn error(&self, message: &str, section: &LogSection) {
            self.entries
                .lock()
                .push(("error", message.to_string(), section.to_string()));
        }

        fn notice(&self, message: &str, section: &LogSection) {
            self.entries
                .lock()
                .push(("notice", message.to_string(), section.to_string()));
        }
    }

    struct Fixture {
        controller: ServiceController<MockLauncher, MockTable, RecordingLog>,
        launcher: Arc<MockLauncher>,
        table: Arc<MockTable>,
        log: Arc<RecordingLog>,
        events: Arc<Mutex<Vec<String>>>,
    }

    fn fixture(spec: ServiceSpec, launcher: MockLauncher, table: MockTable) -> Fixture {
        let events = launcher.events.clone();
        let launcher = Arc::new(launcher);
        let table = Arc::new(table);
        let log = Arc::new(RecordingLog::default());
        let controller = ServiceController::new(
            spec,
            Messages::default(),
            launcher.clone(),
            table.clone(),
            log.clone(),
        );
        Fixture {
            controller,
            launcher,
            table,
            log,
            events,
        }
    }

    fn nginx_spec() -> ServiceSpec {
        let mut spec = ServiceSpec::new(r"C:\svc\nginx.exe", LogSection::from("nginx"));
        spec.start_args = Some("-c nginx.conf".to_string());
        spec.working_dir = Some(r"C:\svc".into());
        spec
    }

    #[tokio::test]
    async fn test_is_running_reflects_process_table() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![]),
        );
        assert!(!f.controller.is_running());

        f.table.pids.lock().push(4242);
        assert!(f.controller.is_running());
    }

    #[tokio::test]
    async fn test_start_when_already_running_is_a_logged_no_op() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![7]),
        );

        let err = f.controller.start().await.unwrap_err();
        assert!(matches!(err, Error::AlreadyRunning { .. }));
        assert!(f.launcher.requests().is_empty());
        assert_eq!(f.log.errors(), vec!["Already running"]);
        assert!(f.log.notices().is_empty());
    }

    #[tokio::test]
    async fn test_start_launches_with_configured_args_and_dir() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::with_pid(events.clone(), 42),
            MockTable::new(events, vec![]),
        );

        f.controller.start().await.unwrap();

        let requests = f.launcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].args, "-c nginx.conf");
        assert_eq!(
            requests[0].working_dir.as_deref(),
            Some(std::path::Path::new(r"C:\svc"))
        );
        assert!(!requests[0].wait_for_exit);
        assert_eq!(f.controller.tracked_pid(), Some(42));
        assert_eq!(f.log.notices(), vec!["Started"]);
    }

    #[tokio::test]
    async fn test_failed_start_logs_error_and_skips_started_notice() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::failing(events.clone()),
            MockTable::new(events, vec![]),
        );

        let err = f.controller.start().await.unwrap_err();
        assert!(matches!(err, Error::Launch(_)));

        let errors = f.log.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Start(): "));
        assert!(f.log.notices().is_empty());
    }

    #[tokio::test]
    async fn test_stop_when_not_running_is_a_logged_no_op() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![]),
        );

        let err = f.controller.stop().await.unwrap_err();
        assert!(matches!(err, Error::NotRunning { .. }));
        assert!(f.table.killed().is_empty());
        assert_eq!(f.log.errors(), vec!["Not running"]);
        assert!(f.log.notices().is_empty());
    }

    #[tokio::test]
    async fn test_stop_without_stop_args_kills_directly() {
        // Scenario: nginx.exe, no stop arguments, one matching process.
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut spec = ServiceSpec::new(r"C:\svc\nginx.exe", LogSection::from("nginx"));
        spec.stop_args = None;
        let f = fixture(
            spec,
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![3]),
        );

        f.controller.stop().await.unwrap();

        assert!(f.launcher.requests().is_empty());
        assert_eq!(f.table.killed(), vec![3]);
        assert_eq!(f.log.notices(), vec!["Stopped"]);
    }

    #[tokio::test]
    async fn test_stop_runs_graceful_invocation_before_killing() {
        // Scenario: php-cgi.exe with "--shutdown" stop arguments.
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut spec = ServiceSpec::new(r"C:\svc\php-cgi.exe", LogSection::from("php"));
        spec.stop_args = Some("--shutdown".to_string());
        let f = fixture(
            spec,
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![11]),
        );

        f.controller.stop().await.unwrap();

        let requests = f.launcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].args, "--shutdown");
        assert!(requests[0].wait_for_exit);
        assert_eq!(
            *f.events.lock(),
            vec!["launch --shutdown".to_string(), "kill 11".to_string()]
        );
        assert_eq!(f.log.notices(), vec!["Stopped"]);
    }

    #[tokio::test]
    async fn test_stop_kills_every_matching_process() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![5, 9, 21]),
        );

        f.controller.stop().await.unwrap();
        assert_eq!(f.table.killed(), vec![5, 9, 21]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_orders_stop_delay_start() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::new(events.clone()),
            MockTable::new(events, vec![8]),
        );

        let before = tokio::time::Instant::now();
        f.controller.restart().await;

        assert!(before.elapsed() >= Duration::from_secs(1));
        assert_eq!(
            *f.events.lock(),
            vec!["kill 8".to_string(), "launch -c nginx.conf".to_string()]
        );
        assert_eq!(f.log.notices(), vec!["Stopped", "Started", "Restarted"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_logs_restarted_even_when_both_halves_fail() {
        // Nothing running and the launcher refuses to spawn: stop and start
        // both fail internally, the sequence still completes.
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::failing(events.clone()),
            MockTable::new(events, vec![]),
        );

        f.controller.restart().await;

        assert_eq!(f.log.notices(), vec!["Restarted"]);
        let errors = f.log.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "Not running");
        assert!(errors[1].starts_with("Start(): "));
    }

    #[tokio::test]
    async fn test_failed_stop_logs_error_and_skips_stopped_notice() {
        // The graceful-stop invocation refuses to spawn: the error is logged
        // with the operation prefix, nothing gets killed, no success notice.
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut spec = ServiceSpec::new(r"C:\svc\php-cgi.exe", LogSection::from("php"));
        spec.stop_args = Some("--shutdown".to_string());
        let f = fixture(
            spec,
            MockLauncher::failing(events.clone()),
            MockTable::new(events, vec![11]),
        );

        let err = f.controller.stop().await.unwrap_err();
        assert!(matches!(err, Error::Launch(_)));

        let errors = f.log.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Stop(): "));
        assert!(f.table.killed().is_empty());
        assert!(f.log.notices().is_empty());
    }

    #[tokio::test]
    async fn test_is_running_clears_dead_tracked_pid_and_returns() {
        // A dead tracked PID must be forgotten in place: the liveness check
        // is called from every operation and has to come back immediately.
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::with_pid(events.clone(), 77),
            MockTable::new(events, vec![]),
        );

        f.controller.start().await.unwrap();
        assert_eq!(f.controller.tracked_pid(), Some(77));

        // The launched process died and nothing matches by name.
        assert!(!f.controller.is_running());
        assert_eq!(f.controller.tracked_pid(), None);

        // Subsequent checks go straight to the name fallback.
        assert!(!f.controller.is_running());
        f.table.pids.lock().push(4);
        assert!(f.controller.is_running());
    }

    #[tokio::test]
    async fn test_tracked_pid_preferred_over_name_lookup() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let f = fixture(
            nginx_spec(),
            MockLauncher::with_pid(events.clone(), 99),
            MockTable::new(events, vec![]),
        );

        f.controller.start().await.unwrap();
        f.table.alive.lock().insert(99);

        // Name lookup finds nothing, the tracked PID keeps us "running".
        assert!(f.controller.is_running());

        // Once the tracked process dies it is forgotten and the name
        // fallback takes over.
        f.table.alive.lock().remove(&99);
        assert!(!f.controller.is_running());
        assert_eq!(f.controller.tracked_pid(), None);
    }
}
