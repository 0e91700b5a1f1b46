//! Decides between a fresh deploy and a zero-downtime replacement.

use std::fmt;

use zdd_saga::{Saga, SagaBuilder};

use crate::error::ControlPlaneError;
use crate::operations::DeployContext;
use crate::operations::deploy::saga_steps::{
    DeleteVenerableStep, DeployStep, RenameLiveInstanceStep,
};
use crate::traits::ControlPlane;

/// Verb the deploy argument list always starts with.
pub const DEPLOY_VERB: &str = "push";

/// Suffix appended to the target name while the old instance is kept aside.
pub const VENERABLE_SUFFIX: &str = "-venerable";

pub type DeploySaga<C> = Saga<DeployContext<C>, ControlPlaneError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// No existing instance: a single deploy.
    Fresh,
    /// An existing instance is renamed, replaced, then deleted.
    ZeroDowntime,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh deploy"),
            Self::ZeroDowntime => write!(f, "zero-downtime replacement"),
        }
    }
}

/// A deployment plan, built fresh for every invocation.
pub struct Plan<C> {
    target_name: String,
    venerable_name: String,
    deploy_args: Vec<String>,
    strategy: Strategy,
    saga: DeploySaga<C>,
}

impl<C> Plan<C>
where
    C: ControlPlane + 'static,
{
    /// Plan a deployment of `target_name` given the currently deployed instances.
    #[must_use]
    pub fn build(
        target_name: &str,
        deploy_args: &[String],
        current_names: &[String],
        rollback_failure_message: &str,
    ) -> Self {
        let venerable_name = venerable_name(target_name);
        let deploy_args = normalize_deploy_args(deploy_args);
        let builder = SagaBuilder::new(rollback_failure_message);

        let (strategy, saga) = if instance_exists(current_names, target_name) {
            let saga = builder
                .first_step(RenameLiveInstanceStep::new(target_name, &venerable_name))
                .then(DeployStep::replacing(
                    deploy_args.clone(),
                    target_name,
                    &venerable_name,
                ))
                .then(DeleteVenerableStep::new(&venerable_name))
                .build();
            (Strategy::ZeroDowntime, saga)
        } else {
            let saga = builder
                .first_step(DeployStep::fresh(deploy_args.clone()))
                .build();
            (Strategy::Fresh, saga)
        };

        Self {
            target_name: target_name.to_string(),
            venerable_name,
            deploy_args,
            strategy,
            saga,
        }
    }

    #[must_use]
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    #[must_use]
    pub fn venerable_name(&self) -> &str {
        &self.venerable_name
    }

    #[must_use]
    pub fn deploy_args(&self) -> &[String] {
        &self.deploy_args
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn saga(&self) -> &DeploySaga<C> {
        &self.saga
    }

    /// Human-readable rendering of the plan's steps.
    #[must_use]
    pub fn describe(&self) -> String {
        let deploy = format!("deploy: {}", self.deploy_args.join(" "));
        let mut lines = vec![format!("{} of '{}'", self.strategy, self.target_name)];

        match self.strategy {
            Strategy::Fresh => lines.push(format!("  1. {deploy}")),
            Strategy::ZeroDowntime => {
                lines.push(format!(
                    "  1. rename '{}' to '{}'",
                    self.target_name, self.venerable_name
                ));
                lines.push(format!("  2. {deploy}"));
                lines.push(format!(
                    "     on failure: delete '{}' and rename '{}' back to '{}'",
                    self.target_name, self.venerable_name, self.target_name
                ));
                lines.push(format!("  3. delete '{}'", self.venerable_name));
            }
        }

        lines.join("\n")
    }
}

/// Whether any deployed instance name contains `target_name`.
///
/// Matching is by substring, so `app` also matches `app2`.
#[must_use]
pub fn instance_exists(current_names: &[String], target_name: &str) -> bool {
    current_names.iter().any(|name| name.contains(target_name))
}

#[must_use]
pub fn venerable_name(target_name: &str) -> String {
    format!("{target_name}{VENERABLE_SUFFIX}")
}

/// Replace the first argument with [`DEPLOY_VERB`].
#[must_use]
pub fn normalize_deploy_args(args: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len().max(1));
    normalized.push(DEPLOY_VERB.to_string());
    normalized.extend(args.iter().skip(1).cloned());
    normalized
}
