//! `provkit` Core Library
//!
//! Core functionality for the `provkit` cluster-provisioning toolkit:
//! remote host access over SSH/SFTP and reference-documentation generation.
//!
//! # Crate Structure
//!
//! - [`host`] - The [`host::ClusterHost`] operation contract and the
//!   SSH-backed [`host::RemoteHost`] implementation
//! - [`docgen`] - Reference-page stub generation and index rewriting
//! - [`settings`] - TOML-backed toolkit settings
//! - [`tracing`] - Structured-logging initialization

#![warn(missing_docs)]

pub mod docgen;
pub mod host;
pub mod settings;
pub mod tracing;

pub use docgen::{DocgenConfig, DocgenError};
pub use host::{
    ClusterHost, FileStat, FileStatus, HostError, HostResult, PathStyle, ProcCtrl, RemoteHost,
    SystemTuple,
};
pub use settings::{HostEntry, Settings};
