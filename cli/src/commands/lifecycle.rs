//! Start, stop, restart and status commands.

use anyhow::{bail, Result};
use svcmgr_core::ConfigStore;

use super::manager_for;

/// Start a service. "Already running" is an expected state, reported and
/// exited cleanly rather than treated as a failure.
pub async fn start(store: &ConfigStore, name: &str) -> Result<()> {
    let manager = manager_for(store).await?;
    let Some(controller) = manager.get(name) else {
        bail!("unknown service: {name}");
    };

    match controller.start().await {
        Ok(()) => println!("{name}: started"),
        Err(e) if e.is_precondition() => println!("{name}: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Stop a service, with the same expected-state handling as `start`.
pub async fn stop(store: &ConfigStore, name: &str) -> Result<()> {
    let manager = manager_for(store).await?;
    let Some(controller) = manager.get(name) else {
        bail!("unknown service: {name}");
    };

    match controller.stop().await {
        Ok(()) => println!("{name}: stopped"),
        Err(e) if e.is_precondition() => println!("{name}: {e}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub async fn restart(store: &ConfigStore, name: &str) -> Result<()> {
    let manager = manager_for(store).await?;
    let Some(controller) = manager.get(name) else {
        bail!("unknown service: {name}");
    };

    controller.restart().await;
    println!("{name}: restarted");
    Ok(())
}

pub async fn status(store: &ConfigStore, name: &str, json: bool) -> Result<()> {
    let manager = manager_for(store).await?;
    let Some(controller) = manager.get(name) else {
        bail!("unknown service: {name}");
    };

    let running = controller.is_running();
    if json {
        println!(
            "{}",
            serde_json::json!({ "name": name, "running": running })
        );
    } else {
        println!("{name}: {}", if running { "running" } else { "stopped" });
    }
    Ok(())
}
