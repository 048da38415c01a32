//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod launcher;
mod log;
mod process_table;

pub use launcher::ProcessLauncherPort;
pub use log::LogSink;
pub use process_table::ProcessTablePort;
