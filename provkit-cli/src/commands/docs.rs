//! Documentation generation command.

use std::path::Path;

use provkit_core::docgen;

use crate::error::CliError;
use crate::util::load_settings;

/// Generate reference docs stubs and rewrite the index table of contents.
///
/// Takes no arguments beyond the global settings file; everything else
/// comes from the `[docgen]` section.
pub fn cmd_docs(config_path: Option<&Path>) -> Result<(), CliError> {
    let settings = load_settings(config_path)?;
    let modules = docgen::generate(&settings.docgen)?;
    println!("Generated {} reference page(s).", modules.len());
    Ok(())
}
