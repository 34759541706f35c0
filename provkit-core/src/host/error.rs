//! Error types for host operations.

use thiserror::Error;

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Errors raised by host operations
#[derive(Debug, Error)]
pub enum HostError {
    /// SSH connection could not be established
    #[error("Failed to connect to {host}: {source}")]
    Connect {
        /// Host the connection was attempted against
        host: String,
        /// Underlying SSH error
        #[source]
        source: russh::Error,
    },

    /// Authentication was rejected by the remote host
    #[error("Authentication failed for {user}@{host}")]
    Auth {
        /// Host that rejected the credentials
        host: String,
        /// Username presented to the host
        user: String,
    },

    /// SSH protocol or channel error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// SFTP subsystem error
    #[error("SFTP error: {0}")]
    Sftp(#[from] russh_sftp::client::error::Error),

    /// A remote command exited with a non-zero status, or a daemon command
    /// finished when it was expected to keep running
    #[error("Command `{cmdln}', running on {host} exited with {exit_status}:\n{output}")]
    RemoteExec {
        /// Host the command ran on
        host: String,
        /// The complete command line
        cmdln: String,
        /// Exit status reported by the remote process
        exit_status: u32,
        /// Captured output (stderr merged into stdout)
        output: String,
    },

    /// `mkdir_p` target or one of its ancestors exists but is not a directory
    #[error("{host}:{path} is not a directory")]
    NotADirectory {
        /// Host the path was inspected on
        host: String,
        /// The offending path
        path: String,
    },

    /// System-identification probe output could not be parsed
    #[error("Unable to parse system probe output from {host}: {output:?}")]
    SystemProbe {
        /// Host that was probed
        host: String,
        /// The raw probe output
        output: String,
    },

    /// Local I/O error (reading a binary to upload, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
