//! Reference-documentation stub generation.
//!
//! Scans a package tree for modules, writes one reference page stub per
//! module, and rewrites the sentinel-delimited table-of-contents region of
//! the documentation index. Output is deterministic: modules are sorted by
//! dotted name, stubs are overwritten unconditionally, and running the
//! generator twice over unchanged sources is a fixed point.

mod discover;
mod render;

pub use discover::discover_modules;
pub use render::{update_index, write_stub};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Result type for documentation generation
pub type DocgenResult<T> = Result<T, DocgenError>;

/// Errors raised by the documentation generator
#[derive(Debug, Error)]
pub enum DocgenError {
    /// Filesystem error while scanning or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scanned module file is not located under the package root
    #[error("Module file {path} is not under the package root {root}")]
    OutsideRoot {
        /// The offending module file
        path: PathBuf,
        /// The configured package root
        root: PathBuf,
    },

    /// The index file lacks the REFTOC sentinel pair, so the generated
    /// table of contents has nowhere to go
    #[error("Index file {0} does not contain the REFTOC sentinel markers")]
    MissingSentinels(PathBuf),
}

/// Configuration for a documentation-generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocgenConfig {
    /// Directory scanned for module files
    pub source_dir: PathBuf,
    /// Root against which dotted module names are derived; must be an
    /// ancestor of `source_dir`
    pub package_root: PathBuf,
    /// Directory the reference stubs are written into
    pub docs_dir: PathBuf,
    /// The index document whose REFTOC region is rewritten
    pub index_file: PathBuf,
    /// File suffix identifying module files
    pub module_suffix: String,
    /// File name marking a package entry point; recorded under the
    /// package's own dotted name instead of a submodule name
    pub entry_point: String,
    /// Module names always included, overriding the ignore lists
    pub included: Vec<String>,
    /// Package-name substrings whose modules are skipped
    pub ignored_packages: Vec<String>,
    /// Module-stem substrings that are skipped in every package
    pub ignored_modules: Vec<String>,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            package_root: PathBuf::from("."),
            docs_dir: PathBuf::from("docs"),
            index_file: PathBuf::from("docs/index.rst"),
            module_suffix: ".py".to_string(),
            entry_point: "__init__.py".to_string(),
            included: Vec::new(),
            ignored_packages: Vec::new(),
            ignored_modules: Vec::new(),
        }
    }
}

/// Runs a full generation pass: discovery, one stub per module, index
/// update. Returns the sorted module list.
pub fn generate(config: &DocgenConfig) -> DocgenResult<Vec<String>> {
    let modules: Vec<String> = discover_modules(config)?.into_iter().collect();
    for module in &modules {
        info!("Generating reference for {module}");
        write_stub(module, &config.docs_dir)?;
    }
    info!("Updating {}", config.index_file.display());
    update_index(&modules, &config.index_file)?;
    Ok(modules)
}
