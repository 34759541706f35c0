//! CLI error types and exit codes.

use provkit_core::host::HostError;

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other non-connection
    /// errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - the remote session could not be established
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host operation error
    #[error("{0}")]
    Host(#[from] HostError),

    /// Documentation generation error
    #[error("Docs error: {0}")]
    Docs(#[from] provkit_core::docgen::DocgenError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Maps the error to a process exit code.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Host(HostError::Connect { .. } | HostError::Auth { .. }) => {
                exit_codes::CONNECTION_FAILURE
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
