use tracing::{debug, info, warn};
use zdd_saga::SagaError;

use super::context::DeployContext;
use super::request::DeployRequest;
use super::saga_steps::DELETE_VENERABLE_STEP;
use crate::Result;
use crate::config::DEFAULT_ROLLBACK_FAILURE_MESSAGE;
use crate::error::{ControlPlaneError, OperationError};
use crate::planner::{Plan, Strategy};
use crate::traits::ControlPlane;

/// Result of a completed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    pub target_name: String,
    pub strategy: Strategy,
    pub steps_executed: usize,
}

/// Plans and executes a zero-downtime redeploy against a control plane.
pub struct ZeroDowntimeDeploy<C> {
    context: DeployContext<C>,
    rollback_failure_message: String,
}

impl<C> ZeroDowntimeDeploy<C>
where
    C: ControlPlane + 'static,
{
    pub fn new(control_plane: C) -> Self {
        Self {
            context: DeployContext::new(control_plane),
            rollback_failure_message: DEFAULT_ROLLBACK_FAILURE_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_rollback_failure_message(mut self, message: impl Into<String>) -> Self {
        self.rollback_failure_message = message.into();
        self
    }

    pub fn control_plane(&self) -> &C {
        self.context.control_plane()
    }

    /// # Errors
    ///
    /// Returns an error if the control plane cannot list its instances.
    pub fn list_instances(&self) -> Result<Vec<String>> {
        self.context
            .control_plane()
            .list_names()
            .map_err(OperationError::ListInstances)
    }

    /// Inspect the deployed instances and build a plan for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the instances cannot be listed; no step runs.
    pub fn plan(&self, request: &DeployRequest) -> Result<Plan<C>> {
        let current_names = self.list_instances()?;
        let plan = Plan::build(
            request.target_name(),
            request.deploy_args(),
            &current_names,
            &self.rollback_failure_message,
        );
        info!(
            target_name = %plan.target_name(),
            strategy = %plan.strategy(),
            steps = plan.saga().len(),
            "planned deployment"
        );
        Ok(plan)
    }

    /// Execute a plan built by [`ZeroDowntimeDeploy::plan`].
    ///
    /// # Errors
    ///
    /// Returns an error describing whether the failure was rolled back, left
    /// the new instance live with a stale venerable instance, or could not be
    /// rolled back.
    pub fn execute(&self, plan: &Plan<C>) -> Result<DeployOutcome> {
        let (result, audit_log) = plan.saga().execute_with_audit(&self.context);
        debug!(summary = %audit_log.summary(), "deployment saga finished");

        match result {
            Ok(()) => Ok(DeployOutcome {
                target_name: plan.target_name().to_string(),
                strategy: plan.strategy(),
                steps_executed: audit_log.records().len(),
            }),
            Err(err) => Err(classify_failure(plan, err)),
        }
    }

    /// Plan and execute in one go.
    ///
    /// # Errors
    ///
    /// See [`ZeroDowntimeDeploy::plan`] and [`ZeroDowntimeDeploy::execute`].
    pub fn run(&self, request: &DeployRequest) -> Result<DeployOutcome> {
        let plan = self.plan(request)?;
        self.execute(&plan)
    }
}

fn classify_failure<C>(plan: &Plan<C>, err: SagaError<ControlPlaneError>) -> OperationError
where
    C: ControlPlane + 'static,
{
    match OperationError::from(err) {
        OperationError::StepFailed { step, source } if step == DELETE_VENERABLE_STEP => {
            warn!(
                venerable = %plan.venerable_name(),
                error = %source,
                "new instance is live but the venerable instance was not removed"
            );
            OperationError::CleanupFailed {
                venerable_name: plan.venerable_name().to_string(),
                source,
            }
        }
        OperationError::RollbackFailed {
            step,
            message,
            source,
            rollback,
        } => {
            warn!(
                step = %step,
                rollback_step = %rollback.step,
                rollback_error = %rollback.error,
                "rollback did not complete"
            );
            OperationError::RollbackFailed {
                step,
                message,
                source,
                rollback,
            }
        }
        other => other,
    }
}
