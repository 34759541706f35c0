//! End-to-end docs generation over a temporary package tree

use std::fs;
use std::path::Path;

use provkit_core::docgen::{DocgenConfig, DocgenError, generate};

const INDEX_TEMPLATE: &str = "Reference\n=========\n\n\
    .. START REFTOC\n.. END REFTOC.\n\nFooter.\n";

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, "").expect("write");
}

fn setup(root: &Path) -> DocgenConfig {
    touch(&root.join("pkg/__init__.py"));
    touch(&root.join("pkg/api.py"));
    touch(&root.join("pkg/internal/secret.py"));
    touch(&root.join("pkg/util/helpers.py"));
    fs::create_dir_all(root.join("docs")).expect("mkdir docs");
    fs::write(root.join("docs/index.rst"), INDEX_TEMPLATE).expect("write index");

    DocgenConfig {
        source_dir: root.join("pkg"),
        package_root: root.to_path_buf(),
        docs_dir: root.join("docs"),
        index_file: root.join("docs/index.rst"),
        ignored_packages: vec!["internal".to_string()],
        ..DocgenConfig::default()
    }
}

#[test]
fn generate_writes_stubs_and_rewrites_index() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = setup(tmp.path());

    let modules = generate(&config).expect("generate");
    assert_eq!(modules, ["pkg", "pkg.api", "pkg.util.helpers"]);

    // One stub per module, at the dotted-to-nested location.
    let api_stub = fs::read_to_string(tmp.path().join("docs/pkg/api.rst")).expect("stub");
    assert!(api_stub.contains("pkg.api\n======="));
    assert!(api_stub.contains(".. automodule:: pkg.api"));
    assert!(tmp.path().join("docs/pkg/util/helpers.rst").exists());
    assert!(!tmp.path().join("docs/pkg/internal").exists());

    // Index region rewritten, surroundings preserved.
    let index = fs::read_to_string(tmp.path().join("docs/index.rst")).expect("index");
    assert!(index.starts_with("Reference\n"));
    assert!(index.ends_with("Footer.\n"));
    assert!(index.contains("pkg/api"));
    assert!(index.contains("pkg/util/helpers"));
}

#[test]
fn generate_twice_is_a_fixed_point() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = setup(tmp.path());

    generate(&config).expect("first run");
    let index_first = fs::read_to_string(tmp.path().join("docs/index.rst")).expect("index");
    let stub_first = fs::read_to_string(tmp.path().join("docs/pkg/api.rst")).expect("stub");

    generate(&config).expect("second run");
    let index_second = fs::read_to_string(tmp.path().join("docs/index.rst")).expect("index");
    let stub_second = fs::read_to_string(tmp.path().join("docs/pkg/api.rst")).expect("stub");

    assert_eq!(index_first, index_second);
    assert_eq!(stub_first, stub_second);
}

#[test]
fn generate_fails_on_index_without_sentinels() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = setup(tmp.path());
    fs::write(tmp.path().join("docs/index.rst"), "Plain index.\n").expect("write");

    let err = generate(&config).expect_err("missing sentinels");
    assert!(matches!(err, DocgenError::MissingSentinels(_)));
}
