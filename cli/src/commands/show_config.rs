//! Config command - show the configuration path and contents.

use anyhow::Result;
use svcmgr_core::ConfigStore;

pub async fn run(store: &ConfigStore, json: bool) -> Result<()> {
    let config = store.load().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Config file: {}", store.config_path().display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
