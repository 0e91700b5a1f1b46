use std::fmt::Debug;

use thiserror::Error;

/// Error from a failed compensation operation.
#[derive(Debug, thiserror::Error)]
#[error("compensation failed for step '{step}': {description}")]
pub struct CompensationError<E> {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from saga execution.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<E: Debug> {
    /// A step failed and no compensation was needed.
    #[error("step '{step}' failed")]
    StepFailed {
        /// Name of the step that failed.
        step: String,
        /// The error that caused the step to fail.
        #[source]
        source: E,
    },

    /// A step failed and every compensation reached by the rollback walk
    /// succeeded.
    #[error("step '{step}' failed and was rolled back")]
    RolledBack {
        /// Name of the step that failed.
        step: String,
        /// Names of the steps whose compensation ran, in invocation order.
        compensated: Vec<String>,
        /// The error that caused the step to fail.
        #[source]
        source: E,
    },

    /// A step failed and a compensation failed too; the rollback walk was
    /// abandoned at that point.
    #[error("step '{failed_step}' failed and rollback did not complete: {message}")]
    RollbackFailed {
        /// Name of the step that originally failed.
        failed_step: String,
        /// The error from the failed step.
        #[source]
        step_error: E,
        /// The compensation that failed.
        compensation_error: CompensationError<E>,
        /// The saga's fixed rollback-failure annotation.
        message: String,
    },
}

impl<E: Debug> SagaError<E> {
    /// Name of the step whose forward operation failed.
    #[must_use]
    pub fn failed_step(&self) -> &str {
        match self {
            Self::StepFailed { step, .. } | Self::RolledBack { step, .. } => step,
            Self::RollbackFailed { failed_step, .. } => failed_step,
        }
    }

    /// The original forward failure.
    #[must_use]
    pub fn step_error(&self) -> &E {
        match self {
            Self::StepFailed { source, .. } | Self::RolledBack { source, .. } => source,
            Self::RollbackFailed { step_error, .. } => step_error,
        }
    }

    /// Consume the error, returning the original forward failure.
    #[must_use]
    pub fn into_step_error(self) -> E {
        match self {
            Self::StepFailed { source, .. } | Self::RolledBack { source, .. } => source,
            Self::RollbackFailed { step_error, .. } => step_error,
        }
    }
}
