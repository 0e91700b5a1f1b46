mod error;
pub mod config;
pub mod operations;
pub mod planner;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use error::{CompensationFailure, ControlPlaneError, OperationError, Result};
