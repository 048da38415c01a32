//! svcmgr CLI - Supervise local service processes
//!
//! A command-line tool for starting, stopping and restarting the service
//! executables listed in the configuration file.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use svcmgr_core::ConfigStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "svcmgr")]
#[command(author, version, about = "Start, stop and restart local service processes")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Use an alternate configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured services and their running state
    #[command(alias = "ls")]
    List,

    /// Start a service
    Start { name: String },

    /// Stop a service
    Stop { name: String },

    /// Restart a service (stop, fixed delay, start)
    Restart { name: String },

    /// Show whether a service is running
    Status { name: String },

    /// Show the configuration file path and contents
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let store = match cli.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };

    match cli.command {
        Commands::List => commands::list::run(&store, cli.json).await,
        Commands::Start { name } => commands::lifecycle::start(&store, &name).await,
        Commands::Stop { name } => commands::lifecycle::stop(&store, &name).await,
        Commands::Restart { name } => commands::lifecycle::restart(&store, &name).await,
        Commands::Status { name } => commands::lifecycle::status(&store, &name, cli.json).await,
        Commands::Config => commands::show_config::run(&store, cli.json).await,
    }
}
