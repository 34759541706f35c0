//! Remote filesystem commands.

use std::path::Path;

use provkit_core::host::{ClusterHost, FileStatus, RemoteHost};

use crate::cli::HostArgs;
use crate::error::CliError;
use crate::util::build_remote_host;

fn with_host<T>(
    config_path: Option<&Path>,
    target: &HostArgs,
    op: impl AsyncFnOnce(&mut RemoteHost) -> Result<T, CliError>,
) -> Result<T, CliError> {
    let mut host = build_remote_host(config_path, target)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create runtime: {e}")))?;
    runtime.block_on(async {
        let result = op(&mut host).await;
        let _ = host.teardown(&[]).await;
        result
    })
}

/// List the contents of a remote directory.
pub fn cmd_ls(config_path: Option<&Path>, target: &HostArgs, path: &str) -> Result<(), CliError> {
    let names = with_host(config_path, target, async |host: &mut RemoteHost| {
        Ok(host.list_dir(path).await?)
    })?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Check whether a remote path exists.
pub fn cmd_stat(config_path: Option<&Path>, target: &HostArgs, path: &str) -> Result<(), CliError> {
    let status = with_host(config_path, target, async |host: &mut RemoteHost| {
        Ok(host.file_exists(path).await?)
    })?;
    match status {
        FileStatus::Found(stat) => {
            let kind = if stat.is_dir() { "directory" } else { "file" };
            println!("{path}: {kind}, {} bytes, mode {:o}", stat.size, stat.mode);
        }
        FileStatus::NotFound => println!("{path}: not found"),
    }
    Ok(())
}

/// Create a remote directory and all missing ancestors.
pub fn cmd_mkdir(
    config_path: Option<&Path>,
    target: &HostArgs,
    path: &str,
) -> Result<(), CliError> {
    with_host(config_path, target, async |host: &mut RemoteHost| {
        Ok(host.mkdir_p(path).await?)
    })?;
    println!("Created {path}");
    Ok(())
}

/// Remove a remote file or directory tree.
pub fn cmd_rm(config_path: Option<&Path>, target: &HostArgs, path: &str) -> Result<(), CliError> {
    with_host(config_path, target, async |host: &mut RemoteHost| {
        Ok(host.rm_r(path).await?)
    })?;
    println!("Removed {path}");
    Ok(())
}
