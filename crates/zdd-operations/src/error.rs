use std::path::PathBuf;

use thiserror::Error;
use zdd_saga::SagaError;

/// Failure of a single control-plane call.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' failed ({})", describe_exit(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("'{command}' produced output that is not valid UTF-8")]
    InvalidOutput {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[allow(clippy::ref_option)]
fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Details about a failed compensation during rollback.
#[derive(Debug)]
pub struct CompensationFailure {
    /// Name of the step whose compensation failed.
    pub step: String,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The error that occurred during compensation.
    pub error: ControlPlaneError,
}

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("failed to list deployed instances")]
    ListInstances(#[source] ControlPlaneError),

    #[error("target name cannot be empty")]
    EmptyTargetName,

    #[error("config file '{0}' not found")]
    ConfigNotFound(PathBuf),

    #[error("failed to read config file '{path}'")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("deployment step '{step}' failed")]
    StepFailed {
        step: String,
        #[source]
        source: ControlPlaneError,
    },

    #[error("deployment step '{step}' failed; the previous instance was restored")]
    RolledBack {
        step: String,
        #[source]
        source: ControlPlaneError,
    },

    #[error("the new instance is live, but removing '{venerable_name}' failed")]
    CleanupFailed {
        venerable_name: String,
        #[source]
        source: ControlPlaneError,
    },

    #[error("{message}")]
    RollbackFailed {
        step: String,
        message: String,
        #[source]
        source: ControlPlaneError,
        rollback: CompensationFailure,
    },
}

pub type Result<T> = std::result::Result<T, OperationError>;

impl From<SagaError<ControlPlaneError>> for OperationError {
    fn from(err: SagaError<ControlPlaneError>) -> Self {
        match err {
            SagaError::StepFailed { step, source } => Self::StepFailed { step, source },
            SagaError::RolledBack { step, source, .. } => Self::RolledBack { step, source },
            SagaError::RollbackFailed {
                failed_step,
                step_error,
                compensation_error,
                message,
            } => Self::RollbackFailed {
                step: failed_step,
                message,
                source: step_error,
                rollback: CompensationFailure {
                    step: compensation_error.step,
                    description: compensation_error.description,
                    error: compensation_error.error,
                },
            },
            other => {
                let step = other.failed_step().to_string();
                Self::StepFailed {
                    step,
                    source: other.into_step_error(),
                }
            }
        }
    }
}

impl OperationError {
    /// The control-plane failure that caused a deployment step to fail, if any.
    #[must_use]
    pub fn step_error(&self) -> Option<&ControlPlaneError> {
        match self {
            Self::StepFailed { source, .. }
            | Self::RolledBack { source, .. }
            | Self::CleanupFailed { source, .. }
            | Self::RollbackFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
