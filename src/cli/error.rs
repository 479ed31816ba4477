//! CLI-level errors (wraps infrastructure errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::exitcode;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        Self::Infra(InfraError::from(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        Self::Infra(InfraError::from(e))
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { source, .. } if source.kind() == ErrorKind::NotFound => {
                    exitcode::NOINPUT
                }
                InfraError::Io { .. } => exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Config { .. } => exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => exitcode::IOERR,
                    ApplicationError::Domain(_) | ApplicationError::NodeNotFound { .. } => {
                        exitcode::SOFTWARE
                    }
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(kind: ErrorKind) -> CliError {
        CliError::from(InfraError::io("open outline", std::io::Error::from(kind)))
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("no input".into()).exit_code(), exitcode::USAGE);
        assert_eq!(io(ErrorKind::NotFound).exit_code(), exitcode::NOINPUT);
        assert_eq!(io(ErrorKind::PermissionDenied).exit_code(), exitcode::IOERR);
        assert_eq!(
            CliError::from(ApplicationError::Config { message: "bad".into() }).exit_code(),
            exitcode::CONFIG
        );
        assert_eq!(
            CliError::from(ApplicationError::NodeNotFound { id: "x".into() }).exit_code(),
            exitcode::SOFTWARE
        );
        assert_eq!(
            CliError::from(DomainError::IdGenerator("exhausted".into())).exit_code(),
            exitcode::SOFTWARE
        );
    }
}
