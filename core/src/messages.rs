//! Notification message catalog.
//!
//! The five fixed lifecycle notifications, with English defaults. The
//! catalog is deserializable so a translated set can be supplied through
//! the configuration file.

use serde::{Deserialize, Serialize};

/// Message text for the lifecycle notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Logged as an error when start finds a live process.
    pub already_running: String,
    /// Logged as an error when stop finds no live process.
    pub not_running: String,
    pub started: String,
    pub stopped: String,
    pub restarted: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            already_running: "Already running".to_string(),
            not_running: "Not running".to_string(),
            started: "Started".to_string(),
            stopped: "Stopped".to_string(),
            restarted: "Restarted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let messages = Messages::default();
        assert_eq!(messages.started, "Started");
        assert_eq!(messages.not_running, "Not running");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let messages: Messages =
            serde_json::from_str(r#"{"started": "Gestartet"}"#).unwrap();
        assert_eq!(messages.started, "Gestartet");
        assert_eq!(messages.stopped, "Stopped");
    }
}
