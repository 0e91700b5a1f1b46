mod context;
mod operation;
mod request;
pub mod saga_steps;

pub use context::DeployContext;
pub use operation::{DeployOutcome, ZeroDowntimeDeploy};
pub use request::DeployRequest;
