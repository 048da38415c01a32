//! Logging adapter forwarding to tracing.

use crate::domain::LogSection;
use crate::ports::LogSink;

/// Log sink that emits through the `tracing` macros, carrying the section
/// as a structured field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl TracingLogSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for TracingLogSink {
    fn error(&self, message: &str, section: &LogSection) {
        tracing::error!(section = %section, "{message}");
    }

    fn notice(&self, message: &str, section: &LogSection) {
        tracing::info!(section = %section, "{message}");
    }
}
