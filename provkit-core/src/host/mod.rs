//! Host abstraction for cluster provisioning.
//!
//! A [`ClusterHost`] is a machine the provisioning toolkit can run commands
//! on and manipulate files on. [`RemoteHost`] implements the contract over
//! an SSH session with an SFTP sub-channel; a local sibling can implement
//! the same trait for the machine the toolkit itself runs on, with the
//! concrete type selected by configuration rather than inheritance.

mod error;
mod exec;
mod fsops;
mod path;
mod remote;
mod transfer;

pub use error::{HostError, HostResult};
pub use exec::{ProcCtrl, join_cmdv};
pub use path::PathStyle;
pub use remote::RemoteHost;
pub use transfer::{FileStat, FileStatus};

use async_trait::async_trait;

/// Operating system and processor of a host, as reported by probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTuple {
    /// OS family name (`Linux`, `SunOS`, normalized `Windows` / `CYGWIN`, ...)
    pub system: String,
    /// Processor architecture string
    pub processor: String,
}

/// Common operation surface for hosts taking part in cluster provisioning.
///
/// Every method takes `&mut self`: a host owns at most one live session and
/// the replace-on-reconnect semantics make concurrent use of one instance
/// meaningless, so exclusive access is required by construction.
#[async_trait]
pub trait ClusterHost: Send {
    /// Name of the host, for diagnostics and error messages.
    fn name(&self) -> &str;

    /// Path syntax family of the host OS.
    fn path_style(&self) -> PathStyle;

    /// Establishes a fresh primary connection, replacing (and closing) any
    /// existing connection and transfer channel.
    async fn connect(&mut self) -> HostResult<()>;

    /// Removes each of `paths` recursively, then closes the transfer
    /// channel and the primary connection.
    async fn teardown(&mut self, paths: &[String]) -> HostResult<()>;

    /// Checks whether a file exists, returning its metadata when it does.
    async fn file_exists(&mut self, path: &str) -> HostResult<FileStatus>;

    /// Lists the child names of a directory.
    async fn list_dir(&mut self, path: &str) -> HostResult<Vec<String>>;

    /// Creates a directory and all missing ancestors (`mkdir -p`).
    async fn mkdir_p(&mut self, path: &str) -> HostResult<()>;

    /// Removes a file, or a directory tree recursively (`rm -r`).
    async fn rm_r(&mut self, path: &str) -> HostResult<()>;

    /// Reads the contents of a file on the host.
    async fn read_file(&mut self, path: &str) -> HostResult<Vec<u8>>;

    /// Executes a command vector on the host.
    ///
    /// In blocking mode returns the captured output (stderr merged into
    /// stdout); in non-blocking mode returns `None` when the command is
    /// still running after the bounded wait.
    async fn exec_cmdv(
        &mut self,
        cmdv: &[String],
        ctrl: &ProcCtrl,
        stdin_file: Option<&str>,
    ) -> HostResult<Option<String>>;

    /// Uploads the binary named by `cmdv[0]` to the host and executes it.
    async fn exec_pkg_cmdv(&mut self, cmdv: &[String]) -> HostResult<Option<String>>;

    /// Identifies the host OS and processor.
    async fn system_tuple(&mut self) -> HostResult<SystemTuple>;
}
