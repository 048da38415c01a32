//! Logging port (interface).

use crate::domain::LogSection;

/// Port for human-readable lifecycle notices and errors.
///
/// Messages are routed by section so a front end can group them per service.
pub trait LogSink: Send + Sync {
    fn error(&self, message: &str, section: &LogSection);

    fn notice(&self, message: &str, section: &LogSection);
}
