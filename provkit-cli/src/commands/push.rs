//! Upload-and-run command for package binaries.

use std::path::Path;

use provkit_core::host::ClusterHost;

use crate::cli::HostArgs;
use crate::error::CliError;
use crate::util::build_remote_host;

/// Upload a local binary over SFTP and execute it on the remote host.
pub fn cmd_push_run(
    config_path: Option<&Path>,
    target: &HostArgs,
    cmd: &[String],
) -> Result<(), CliError> {
    let mut host = build_remote_host(config_path, target)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create runtime: {e}")))?;
    let output = runtime.block_on(async {
        let result = host.exec_pkg_cmdv(cmd).await;
        let _ = host.teardown(&[]).await;
        result
    })?;

    if let Some(output) = output {
        print!("{output}");
    }
    Ok(())
}
