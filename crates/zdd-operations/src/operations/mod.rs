pub mod deploy;

pub use deploy::{DeployContext, DeployOutcome, DeployRequest, ZeroDowntimeDeploy};
