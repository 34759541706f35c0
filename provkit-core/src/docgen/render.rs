//! Stub rendering and index table-of-contents rewriting.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use super::{DocgenError, DocgenResult};

/// Start/end sentinels delimiting the generated region of the index file.
const TOC_START: &str = ".. START REFTOC";
const TOC_END: &str = ".. END REFTOC.";

static TOC_REGEX: OnceLock<Regex> = OnceLock::new();

fn toc_regex() -> &'static Regex {
    TOC_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\.\. START REFTOC.*\.\. END REFTOC\.\n")
            .unwrap_or_else(|err| unreachable!("static regex: {err}"))
    })
}

/// Renders the fixed stub template for one module.
fn render_stub(module: &str) -> String {
    let underline = "=".repeat(module.len());
    format!(
        ".. DO NOT EDIT, generated by the provkit docs generator.\n\
         \n\
         {module}\n\
         {underline}\n\
         \n\
         .. automodule:: {module}\n   \
         :members:\n   \
         :inherited-members:\n   \
         :undoc-members:\n"
    )
}

/// Renders the sentinel-delimited table-of-contents region.
fn render_toc(modules: &[String]) -> String {
    let toctree = modules
        .iter()
        .map(|m| m.replace('.', "/"))
        .collect::<Vec<_>>()
        .join("\n   ");
    format!(
        "{TOC_START}, generated by the provkit docs generator.\n\
         .. toctree::\n\
         \n   \
         {toctree}\n\
         \n\
         {TOC_END}\n"
    )
}

/// Computes the stub file path for a dotted module name.
fn stub_path(module: &str, docs_dir: &Path) -> PathBuf {
    let mut path = docs_dir.to_path_buf();
    for part in module.split('.') {
        path.push(part);
    }
    path.set_extension("rst");
    path
}

/// Writes the reference stub for `module` under `docs_dir`, creating parent
/// directories as needed and overwriting any existing stub.
pub fn write_stub(module: &str, docs_dir: &Path) -> DocgenResult<()> {
    let path = stub_path(module, docs_dir);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, render_stub(module))?;
    Ok(())
}

/// Replaces the REFTOC region of the index file with a freshly generated
/// table of contents, preserving all surrounding content.
///
/// A missing sentinel pair is an explicit error rather than a silent no-op,
/// so a malformed index cannot go unnoticed.
pub fn update_index(modules: &[String], index_file: &Path) -> DocgenResult<()> {
    let contents = fs::read_to_string(index_file)?;
    let re = toc_regex();
    if !re.is_match(&contents) {
        return Err(DocgenError::MissingSentinels(index_file.to_path_buf()));
    }
    let toc = render_toc(modules);
    let updated = re.replace(&contents, NoExpand(&toc));
    fs::write(index_file, updated.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_contains_name_underline_and_directive() {
        let stub = render_stub("pkg.mod");
        assert!(stub.contains("pkg.mod\n======="));
        assert!(stub.contains(".. automodule:: pkg.mod"));
        assert!(stub.contains(":members:"));
    }

    #[test]
    fn underline_matches_module_name_length() {
        for name in ["a", "pkg.a", "a.really.long.module.name"] {
            let stub = render_stub(name);
            let expected = format!("{name}\n{}\n", "=".repeat(name.len()));
            assert!(stub.contains(&expected), "bad underline for {name}");
        }
    }

    #[test]
    fn stub_path_maps_dots_to_directories() {
        let path = stub_path("pkg.sub.leaf", Path::new("docs"));
        assert_eq!(path, Path::new("docs/pkg/sub/leaf.rst"));
    }

    #[test]
    fn write_stub_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_stub("pkg.a", tmp.path()).expect("first write");
        let first = fs::read(tmp.path().join("pkg/a.rst")).expect("read");
        write_stub("pkg.a", tmp.path()).expect("second write");
        let second = fs::read(tmp.path().join("pkg/a.rst")).expect("read");
        assert_eq!(first, second);
    }

    #[test]
    fn update_index_replaces_only_the_sentinel_region() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let index = tmp.path().join("index.rst");
        fs::write(
            &index,
            "Intro text.\n\n.. START REFTOC\nold\n.. END REFTOC.\nOutro text.\n",
        )
        .expect("write");

        let modules = vec!["pkg".to_string(), "pkg.a".to_string()];
        update_index(&modules, &index).expect("update");
        let updated = fs::read_to_string(&index).expect("read");
        assert!(updated.starts_with("Intro text.\n"));
        assert!(updated.ends_with("Outro text.\n"));
        assert!(updated.contains("pkg/a"));
        assert!(!updated.contains("old\n"));
    }

    #[test]
    fn update_index_twice_is_a_fixed_point() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let index = tmp.path().join("index.rst");
        fs::write(&index, ".. START REFTOC\n.. END REFTOC.\n").expect("write");

        let modules = vec!["m".to_string()];
        update_index(&modules, &index).expect("first update");
        let first = fs::read_to_string(&index).expect("read");
        update_index(&modules, &index).expect("second update");
        let second = fs::read_to_string(&index).expect("read");
        assert_eq!(first, second);
    }

    #[test]
    fn update_index_without_sentinels_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let index = tmp.path().join("index.rst");
        fs::write(&index, "No sentinels here.\n").expect("write");

        let err = update_index(&[], &index).expect_err("missing sentinels");
        assert!(matches!(err, DocgenError::MissingSentinels(_)));
    }
}
