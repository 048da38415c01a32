//! Application layer - Use case services.
//!
//! The controller drives one service's lifecycle through the ports; the
//! manager builds controllers from configuration over shared adapters.

mod controller;
mod manager;

pub use controller::ServiceController;
pub use manager::{OsServiceManager, ServiceManager};
