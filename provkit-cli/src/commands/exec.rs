//! Remote command execution.

use std::path::Path;

use provkit_core::host::{ClusterHost, ProcCtrl};

use crate::cli::HostArgs;
use crate::error::CliError;
use crate::util::build_remote_host;

/// Execute a command vector on a remote host.
pub fn cmd_exec(
    config_path: Option<&Path>,
    target: &HostArgs,
    daemon_wait: Option<u64>,
    stdin_file: Option<&str>,
    cmd: &[String],
) -> Result<(), CliError> {
    let mut host = build_remote_host(config_path, target)?;
    let ctrl = match daemon_wait {
        Some(secs) => ProcCtrl::daemon(secs),
        None => ProcCtrl::blocking(),
    };

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create runtime: {e}")))?;
    let output = runtime.block_on(async {
        let result = host.exec_cmdv(cmd, &ctrl, stdin_file).await;
        let _ = host.teardown(&[]).await;
        result
    })?;

    match output {
        Some(output) => print!("{output}"),
        None => println!("Started (not waiting for completion)."),
    }
    Ok(())
}
