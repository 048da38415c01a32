//! svcmgr Core Library
//!
//! Cross-platform library for supervising local service processes.
//! Provides functionality to:
//! - Start a service executable with configured arguments and environment
//! - Stop it, optionally through a graceful stop invocation first
//! - Restart it with a fixed delay between stop and start
//! - Query whether a service process is currently running
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Identity caveat
//! Liveness tracking prefers the PID recorded at launch time and falls back
//! to name-based process-table lookup. The fallback cannot tell the managed
//! process apart from unrelated processes sharing the executable name.

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;
pub mod messages;

// Re-export domain types (primary API)
pub use domain::{LaunchRequest, LogSection, ServiceSpec};

// Re-export other commonly used types
pub use adapters::{SysinfoProcessTable, TokioLauncher, TracingLogSink};
pub use application::{OsServiceManager, ServiceController, ServiceManager};
pub use config::{Config, ConfigStore, ServiceEntry};
pub use error::{Error, Result};
pub use messages::Messages;
