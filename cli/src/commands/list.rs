//! List command - show all configured services.

use anyhow::Result;
use serde::Serialize;
use svcmgr_core::ConfigStore;

use super::manager_for;

#[derive(Serialize)]
struct ServiceRow {
    name: String,
    running: bool,
    executable: String,
}

pub async fn run(store: &ConfigStore, json: bool) -> Result<()> {
    let manager = manager_for(store).await?;

    let rows: Vec<ServiceRow> = manager
        .controllers()
        .iter()
        .map(|controller| ServiceRow {
            name: controller.spec().section().to_string(),
            running: controller.is_running(),
            executable: controller.spec().executable().display().to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No services configured.");
        return Ok(());
    }

    // Table header
    println!("{:<20} {:<10} EXECUTABLE", "NAME", "STATE");
    println!("{}", "-".repeat(60));

    for row in &rows {
        let state = if row.running { "running" } else { "stopped" };
        println!("{:<20} {:<10} {}", row.name, state, row.executable);
    }

    println!("\nTotal: {} services", rows.len());
    Ok(())
}
