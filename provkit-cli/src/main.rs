//! `provkit` CLI - command-line interface for the cluster-provisioning
//! toolkit
//!
//! Provides commands for executing commands on remote hosts, manipulating
//! remote files and directories, uploading and running package binaries,
//! probing host system information, and generating reference documentation.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use provkit_core::tracing::{TracingConfig, TracingLevel, init_tracing};

fn main() {
    let cli = Cli::parse();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        match cli.verbose {
            0 => TracingLevel::Info,
            1 => TracingLevel::Debug,
            _ => TracingLevel::Trace,
        }
    };
    if let Err(e) = init_tracing(&TracingConfig::with_level(level)) {
        eprintln!("Warning: {e}");
    }

    let config_path = cli.config.as_deref();
    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
