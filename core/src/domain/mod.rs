//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod launch;
mod service;

// Re-export all domain types
pub use launch::LaunchRequest;
pub use service::{LogSection, ServiceSpec};
