//! CLI-level errors (wraps domain and backend errors)

use thiserror::Error;

use crate::backend::BackendError;
use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Domain(_) => crate::exitcode::DATAERR,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Backend(e) => match e {
                BackendError::MountMissing(_) => crate::exitcode::NOINPUT,
                BackendError::UnsupportedSrType(_) => crate::exitcode::USAGE,
                BackendError::CommandSpawn { .. } | BackendError::CommandFailed { .. } => {
                    crate::exitcode::UNAVAILABLE
                }
                BackendError::ScanFormat { .. } | BackendError::InvalidVhd { .. } => {
                    crate::exitcode::DATAERR
                }
                BackendError::Io { .. } => crate::exitcode::IOERR,
            },
        }
    }
}
