//! Remote system identification command.

use std::path::Path;

use provkit_core::host::ClusterHost;

use crate::cli::HostArgs;
use crate::error::CliError;
use crate::util::build_remote_host;

/// Probe a remote host for its OS family and processor.
pub fn cmd_sysinfo(config_path: Option<&Path>, target: &HostArgs) -> Result<(), CliError> {
    let mut host = build_remote_host(config_path, target)?;
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Config(format!("Failed to create runtime: {e}")))?;
    let tuple = runtime.block_on(async {
        let result = host.system_tuple().await;
        let _ = host.teardown(&[]).await;
        result
    })?;

    println!("system: {}", tuple.system);
    println!("processor: {}", tuple.processor);
    Ok(())
}
