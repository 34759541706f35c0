//! Recursive filesystem operations over a transfer channel.
//!
//! These free functions hold the `mkdir -p` / `rm -r` logic shared by any
//! transfer backend. Paths passed in are already SFTP-translated (drive
//! prefix stripped); recursion inside `rm_r` joins children with POSIX
//! separators, matching how the SFTP server interprets them.

use futures::future::BoxFuture;
use tracing::debug;

use super::error::{HostError, HostResult};
use super::path::PathStyle;
use super::transfer::{FileStatus, Transfer};

/// Permission classes checked when a directory listing comes back empty.
const PERMISSION_ROLES: [(&str, u32); 3] = [("owner", 6), ("group", 3), ("other", 0)];

/// Stats `path`, distinguishing "not found" from transfer errors.
pub(crate) async fn file_exists<T: Transfer>(
    transfer: &mut T,
    path: &str,
) -> HostResult<FileStatus> {
    transfer.stat(path).await
}

/// Lists the children of a directory.
///
/// An empty result can also mean the server suppressed entries because a
/// permission class lacks read or execute on the directory; SFTP servers
/// tend to report that as an empty listing rather than an error, so the
/// permission bits are inspected and a diagnostic is emitted for each class
/// missing both.
pub(crate) async fn list_dir<T: Transfer>(
    transfer: &mut T,
    path: &str,
) -> HostResult<Vec<String>> {
    let content = transfer.read_dir(path).await?;
    if content.is_empty() {
        if let FileStatus::Found(stat) = transfer.stat(path).await? {
            for (role, shift) in PERMISSION_ROLES {
                let mask = 0o5 << shift;
                if stat.mode & mask != mask {
                    debug!(
                        "Directory {path} does not have both read and execute \
                         permission for {role}. If you depend on {role} for access, \
                         the empty directory listing may not be correct"
                    );
                }
            }
        }
    }
    Ok(content)
}

/// Creates `path` and all missing ancestors, `mkdir -p` style.
///
/// An existing directory is a silent no-op; an existing non-directory is an
/// error. A bare drive prefix (possible on Windows hosts before SFTP
/// translation strips it) is treated as already present.
pub(crate) fn mkdir_p<'a, T: Transfer>(
    transfer: &'a mut T,
    host: &'a str,
    style: PathStyle,
    path: &'a str,
) -> BoxFuture<'a, HostResult<()>> {
    Box::pin(async move {
        debug!("mkdir_p({path})");
        match transfer.stat(path).await? {
            FileStatus::Found(stat) => {
                if stat.is_dir() {
                    Ok(())
                } else {
                    Err(HostError::NotADirectory {
                        host: host.to_string(),
                        path: path.to_string(),
                    })
                }
            }
            FileStatus::NotFound => {
                if style.splitdrive(path).1.is_empty() {
                    debug!("path={path} is a drive prefix, nothing to create");
                    return Ok(());
                }
                // dirname of a path with a trailing separator is the path
                // itself minus the separator, so normalize first.
                let np = style.normpath(path);
                let parent = style.dirname(&np);
                if !parent.is_empty() && parent != np {
                    mkdir_p(transfer, host, style, &parent).await?;
                }
                transfer.mkdir(&np).await
            }
        }
    })
}

/// Removes a file, or a directory tree depth-first (children before the
/// directory itself).
pub(crate) fn rm_r<'a, T: Transfer>(
    transfer: &'a mut T,
    path: &'a str,
) -> BoxFuture<'a, HostResult<()>> {
    Box::pin(async move {
        let is_dir = match transfer.stat(path).await? {
            FileStatus::Found(stat) => stat.is_dir(),
            FileStatus::NotFound => {
                return Err(HostError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{path} does not exist"),
                )));
            }
        };
        if is_dir {
            for name in transfer.read_dir(path).await? {
                let child = PathStyle::Posix.join(path, &name);
                rm_r(transfer, &child).await?;
            }
            transfer.remove_dir(path).await
        } else {
            transfer.remove_file(path).await
        }
    })
}
