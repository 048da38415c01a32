//! Adapters layer - External system implementations.
//!
//! OS-facing implementations of the ports: child-process launching via
//! tokio, process-table queries via sysinfo, logging via tracing.

mod launcher;
mod log;
mod process_table;

pub use launcher::TokioLauncher;
pub use log::TracingLogSink;
pub use process_table::SysinfoProcessTable;
