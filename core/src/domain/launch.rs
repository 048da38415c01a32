//! Launch request value object.

use std::collections::HashMap;
use std::path::PathBuf;

/// Everything needed for a single child-process launch.
///
/// The argument string is split on whitespace before being handed to the OS;
/// no shell is ever involved. Duplicate environment keys are a caller error
/// and are passed through as-is.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    pub executable: PathBuf,
    pub args: String,
    /// Working directory; the launcher falls back to its configured startup
    /// directory when unset.
    pub working_dir: Option<PathBuf>,
    /// When true, the launch blocks until the child exits.
    pub wait_for_exit: bool,
    /// Extra environment variables added to the child's environment.
    pub env: HashMap<String, String>,
    /// Request OS-level privilege elevation for the child. Elevated launches
    /// always run from the startup directory and ignore `env`.
    pub elevated: bool,
}

impl LaunchRequest {
    pub fn new(executable: impl Into<PathBuf>, args: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            args: args.into(),
            working_dir: None,
            wait_for_exit: false,
            env: HashMap::new(),
            elevated: false,
        }
    }

    pub fn working_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir = dir;
        self
    }

    pub fn wait_for_exit(mut self, wait: bool) -> Self {
        self.wait_for_exit = wait;
        self
    }

    pub fn env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// The argument string split into an argv-style vector.
    pub fn argv(&self) -> Vec<&str> {
        self.args.split_whitespace().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_splits_on_whitespace() {
        let request = LaunchRequest::new("php-cgi", "--shutdown  -q");
        assert_eq!(request.argv(), vec!["--shutdown", "-q"]);
    }

    #[test]
    fn test_argv_empty_args() {
        let request = LaunchRequest::new("nginx", "");
        assert!(request.argv().is_empty());
    }

    #[test]
    fn test_builder_flags() {
        let request = LaunchRequest::new("httpd", "-k install")
            .wait_for_exit(true)
            .elevated(true);
        assert!(request.wait_for_exit);
        assert!(request.elevated);
        assert!(request.working_dir.is_none());
    }
}
