//! Module discovery: package-tree walk and filtering.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use super::{DocgenConfig, DocgenError, DocgenResult};

/// Walks the configured source tree and returns the dotted names of all
/// modules that survive the inclusion/ignore filters.
///
/// The result is a sorted set, so it does not depend on filesystem
/// traversal order. Filtering: an exact match in `included` always wins;
/// otherwise a module is dropped when any `ignored_packages` entry occurs
/// in its package-name prefix, or any `ignored_modules` entry occurs in its
/// file stem.
pub fn discover_modules(config: &DocgenConfig) -> DocgenResult<BTreeSet<String>> {
    let mut modules = BTreeSet::new();
    for entry in WalkDir::new(&config.source_dir) {
        let entry = entry.map_err(|err| DocgenError::Io(err.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !file_name.ends_with(&config.module_suffix) {
            continue;
        }
        let (package_name, module_name) = names_for(entry.path(), config)?;

        if config.included.iter().any(|inc| *inc == module_name) {
            // Explicitly included, skip the ignore lists.
        } else if config
            .ignored_packages
            .iter()
            .any(|ign| package_name.contains(ign.as_str()))
        {
            continue;
        } else {
            let stem = file_name
                .strip_suffix(&config.module_suffix)
                .unwrap_or(file_name);
            if config
                .ignored_modules
                .iter()
                .any(|ign| stem.contains(ign.as_str()))
            {
                continue;
            }
        }

        if file_name == config.entry_point {
            modules.insert(package_name);
        } else {
            modules.insert(module_name);
        }
    }
    Ok(modules)
}

/// Derives the dotted `(package_name, module_name)` pair for a module file.
fn names_for(path: &Path, config: &DocgenConfig) -> DocgenResult<(String, String)> {
    let parent = path.parent().unwrap_or(Path::new(""));
    let package_path =
        parent
            .strip_prefix(&config.package_root)
            .map_err(|_| DocgenError::OutsideRoot {
                path: path.to_path_buf(),
                root: config.package_root.clone(),
            })?;
    let package_name = package_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join(".");
    let stem = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .map(|n| {
            n.strip_suffix(&config.module_suffix)
                .unwrap_or(&n)
                .to_string()
        })
        .unwrap_or_default();
    let module_name = if package_name.is_empty() {
        stem
    } else {
        format!("{package_name}.{stem}")
    };
    Ok((package_name, module_name))
}
