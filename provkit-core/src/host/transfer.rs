//! Transfer-channel abstraction over SFTP.
//!
//! The recursive filesystem operations in [`super::fsops`] are written
//! against the small [`Transfer`] trait rather than the SFTP client
//! directly, so their call ordering can be verified with an in-memory mock.

use async_trait::async_trait;
use russh_sftp::client::SftpSession;
use russh_sftp::protocol::{FileAttributes, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use super::error::HostResult;

/// File type and permission bits from `st_mode`.
const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;

/// Metadata for a remote file, reduced to what the host layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// File size in bytes, when the server reports one
    pub size: u64,
    /// Full `st_mode` bits (file type and permissions)
    pub mode: u32,
}

impl FileStat {
    /// Whether the mode bits identify a directory.
    pub const fn is_dir(self) -> bool {
        self.mode & S_IFMT == S_IFDIR
    }
}

impl From<&FileAttributes> for FileStat {
    fn from(attrs: &FileAttributes) -> Self {
        Self {
            size: attrs.size.unwrap_or(0),
            mode: attrs.permissions.unwrap_or(0),
        }
    }
}

/// Outcome of a remote stat: the file either exists with metadata or it
/// does not. Transfer errors other than "no such file" surface as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The path exists; metadata attached
    Found(FileStat),
    /// The path does not exist
    NotFound,
}

impl FileStatus {
    /// Returns the metadata when the file exists.
    pub const fn stat(self) -> Option<FileStat> {
        match self {
            Self::Found(stat) => Some(stat),
            Self::NotFound => None,
        }
    }
}

/// Minimal transfer-channel surface used by the filesystem operations.
#[async_trait]
pub(crate) trait Transfer: Send {
    async fn stat(&mut self, path: &str) -> HostResult<FileStatus>;
    async fn read_dir(&mut self, path: &str) -> HostResult<Vec<String>>;
    async fn mkdir(&mut self, path: &str) -> HostResult<()>;
    async fn remove_file(&mut self, path: &str) -> HostResult<()>;
    async fn remove_dir(&mut self, path: &str) -> HostResult<()>;
    async fn read(&mut self, path: &str) -> HostResult<Vec<u8>>;
    async fn write(&mut self, path: &str, contents: &[u8]) -> HostResult<()>;
    async fn chmod(&mut self, path: &str, mode: u32) -> HostResult<()>;
}

fn is_no_such_file(err: &russh_sftp::client::error::Error) -> bool {
    matches!(
        err,
        russh_sftp::client::error::Error::Status(status)
            if status.status_code == StatusCode::NoSuchFile
    )
}

#[async_trait]
impl Transfer for SftpSession {
    async fn stat(&mut self, path: &str) -> HostResult<FileStatus> {
        match self.metadata(path).await {
            Ok(attrs) => Ok(FileStatus::Found(FileStat::from(&attrs))),
            Err(err) if is_no_such_file(&err) => Ok(FileStatus::NotFound),
            Err(err) => {
                debug!("stat failure on {path}");
                Err(err.into())
            }
        }
    }

    async fn read_dir(&mut self, path: &str) -> HostResult<Vec<String>> {
        let entries = SftpSession::read_dir(self, path).await?;
        Ok(entries.map(|entry| entry.file_name()).collect())
    }

    async fn mkdir(&mut self, path: &str) -> HostResult<()> {
        Ok(self.create_dir(path).await?)
    }

    async fn remove_file(&mut self, path: &str) -> HostResult<()> {
        Ok(SftpSession::remove_file(self, path).await?)
    }

    async fn remove_dir(&mut self, path: &str) -> HostResult<()> {
        Ok(SftpSession::remove_dir(self, path).await?)
    }

    async fn read(&mut self, path: &str) -> HostResult<Vec<u8>> {
        let mut file = self.open(path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;
        file.shutdown().await?;
        Ok(contents)
    }

    async fn write(&mut self, path: &str, contents: &[u8]) -> HostResult<()> {
        let mut file = self.create(path).await?;
        file.write_all(contents).await?;
        file.shutdown().await?;
        Ok(())
    }

    async fn chmod(&mut self, path: &str, mode: u32) -> HostResult<()> {
        let attrs = FileAttributes {
            permissions: Some(mode),
            ..Default::default()
        };
        Ok(self.set_metadata(path, attrs).await?)
    }
}
