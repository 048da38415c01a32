//! Configuration management for the managed-service roster.
//!
//! Stores configuration in JSON format at `~/.svcmgr/config.json`.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::{LogSection, ServiceSpec};
use crate::error::{Error, Result};
use crate::messages::Messages;

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Managed services, in display order.
    #[serde(default)]
    pub services: Vec<ServiceEntry>,

    /// Notification message catalog; partial overrides fall back to the
    /// English defaults.
    #[serde(default)]
    pub messages: Messages,
}

/// One managed service as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Display name; also the log section and lookup key.
    pub name: String,

    /// Path to the service binary. Not validated at load time; a missing
    /// binary surfaces as a launch error.
    pub executable: PathBuf,

    #[serde(default, rename = "startArgs", skip_serializing_if = "Option::is_none")]
    pub start_args: Option<String>,

    #[serde(default, rename = "stopArgs", skip_serializing_if = "Option::is_none")]
    pub stop_args: Option<String>,

    #[serde(default, rename = "configDir", skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<PathBuf>,

    #[serde(default, rename = "logDir", skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    #[serde(default, rename = "workingDir", skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables for the start invocation.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            executable: executable.into(),
            start_args: None,
            stop_args: None,
            config_dir: None,
            log_dir: None,
            working_dir: None,
            env: HashMap::new(),
        }
    }

    /// Build the runtime spec for this entry.
    pub fn to_spec(&self) -> ServiceSpec {
        let mut spec = ServiceSpec::new(&self.executable, LogSection::new(&self.name));
        spec.start_args = self.start_args.clone();
        spec.stop_args = self.stop_args.clone();
        spec.config_dir = self.config_dir.clone();
        spec.log_dir = self.log_dir.clone();
        spec.working_dir = self.working_dir.clone();
        spec.env = self.env.clone();
        spec
    }
}

/// Configuration store for the service roster.
///
/// Handles reading and writing configuration to `~/.svcmgr/config.json`.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a new config store with the default path.
    ///
    /// Default path: `~/.svcmgr/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        let config_path = home.join(".svcmgr").join("config.json");
        Ok(Self { config_path })
    }

    /// Create a config store with a custom path (for testing or `--config`).
    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path.parent().unwrap().to_path_buf()
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self.config_dir();
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .await
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        // Write atomically by writing to temp file then renaming
        let temp_path = self.config_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to create temp config file: {}", e)))?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| Error::Config(format!("Failed to write config: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| Error::Config(format!("Failed to sync config: {}", e)))?;

        fs::rename(&temp_path, &self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to rename config file: {}", e)))?;

        Ok(())
    }

    /// Add a service to the roster. The name must be unique.
    pub async fn add_service(&self, entry: ServiceEntry) -> Result<()> {
        let mut config = self.load().await?;

        if config
            .services
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&entry.name))
        {
            return Err(Error::Config(format!(
                "Service {} is already configured",
                entry.name
            )));
        }

        config.services.push(entry);
        self.save(&config).await
    }

    /// Remove a service from the roster by name.
    pub async fn remove_service(&self, name: &str) -> Result<()> {
        let mut config = self.load().await?;
        config
            .services
            .retain(|s| !s.name.eq_ignore_ascii_case(name));
        self.save(&config).await
    }
}
