//! CLI command implementations.

pub mod lifecycle;
pub mod list;
pub mod show_config;

use anyhow::Result;
use svcmgr_core::{ConfigStore, OsServiceManager};

/// Load the configuration and build a manager over the OS adapters.
///
/// The current directory is passed in as the startup directory: it is the
/// fallback working directory for services that do not configure one.
pub async fn manager_for(store: &ConfigStore) -> Result<OsServiceManager> {
    let config = store.load().await?;
    let startup_dir = std::env::current_dir()?;
    Ok(OsServiceManager::from_config(&config, startup_dir))
}
