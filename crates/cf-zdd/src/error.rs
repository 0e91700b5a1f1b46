use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] zdd_operations::OperationError),

    #[error("failed to determine the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("'--dry-run' must come before APP_NAME; everything after APP_NAME is passed to push")]
    MisplacedDryRun,
}

pub type Result<T> = std::result::Result<T, CliError>;
