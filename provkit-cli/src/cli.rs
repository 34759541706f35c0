//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// `provkit` command-line interface for cluster provisioning
#[derive(Parser)]
#[command(name = "provkit")]
#[command(author, version, about = "provkit command-line interface")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Remote host selection shared by all host-facing commands
#[derive(Args)]
pub struct HostArgs {
    /// Host to operate on: a name from the settings file, or an address
    #[arg(short = 'H', long)]
    pub host: String,

    /// SSH port (overrides the settings file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Username for authentication (overrides the settings file)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password for authentication; prompted for when absent
    #[arg(long, env = "PROVKIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the password from the first line of stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Execute a command on a remote host
    #[command(about = "Execute a command vector on a remote host")]
    Exec {
        #[command(flatten)]
        target: HostArgs,

        /// Launch without waiting for completion, sleeping this many
        /// seconds before verifying the process is still running
        #[arg(long, value_name = "SECONDS")]
        daemon_wait: Option<u64>,

        /// Remote file streamed to the command's standard input
        #[arg(long, value_name = "PATH")]
        stdin_file: Option<String>,

        /// Command and arguments
        #[arg(required = true, trailing_var_arg = true)]
        cmd: Vec<String>,
    },

    /// List a remote directory
    #[command(about = "List the contents of a remote directory")]
    Ls {
        #[command(flatten)]
        target: HostArgs,

        /// Directory to list
        path: String,
    },

    /// Stat a remote path
    #[command(about = "Check whether a remote path exists")]
    Stat {
        #[command(flatten)]
        target: HostArgs,

        /// Path to check
        path: String,
    },

    /// Create a remote directory tree
    #[command(about = "Create a remote directory and all missing ancestors")]
    Mkdir {
        #[command(flatten)]
        target: HostArgs,

        /// Directory to create
        path: String,
    },

    /// Remove a remote path recursively
    #[command(about = "Remove a remote file or directory tree")]
    Rm {
        #[command(flatten)]
        target: HostArgs,

        /// Path to remove
        path: String,
    },

    /// Upload a binary and run it on a remote host
    #[command(about = "Upload a local binary over SFTP and execute it remotely")]
    PushRun {
        #[command(flatten)]
        target: HostArgs,

        /// Local binary followed by its arguments
        #[arg(required = true, trailing_var_arg = true)]
        cmd: Vec<String>,
    },

    /// Identify the remote operating system and processor
    #[command(about = "Probe a remote host for its OS family and processor")]
    Sysinfo {
        #[command(flatten)]
        target: HostArgs,
    },

    /// Generate reference documentation stubs
    #[command(about = "Generate reference docs and rewrite the index table of contents")]
    Docs,
}
