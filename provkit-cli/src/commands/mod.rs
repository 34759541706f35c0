//! Command handler modules for the CLI.

mod docs;
mod exec;
mod fs;
mod push;
mod sysinfo;

use std::path::Path;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Exec {
            target,
            daemon_wait,
            stdin_file,
            cmd,
        } => exec::cmd_exec(config_path, &target, daemon_wait, stdin_file.as_deref(), &cmd),
        Commands::Ls { target, path } => fs::cmd_ls(config_path, &target, &path),
        Commands::Stat { target, path } => fs::cmd_stat(config_path, &target, &path),
        Commands::Mkdir { target, path } => fs::cmd_mkdir(config_path, &target, &path),
        Commands::Rm { target, path } => fs::cmd_rm(config_path, &target, &path),
        Commands::PushRun { target, cmd } => push::cmd_push_run(config_path, &target, &cmd),
        Commands::Sysinfo { target } => sysinfo::cmd_sysinfo(config_path, &target),
        Commands::Docs => docs::cmd_docs(config_path),
    }
}
