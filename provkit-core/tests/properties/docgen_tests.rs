//! Property tests for module discovery

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use proptest::prelude::*;
use provkit_core::docgen::{DocgenConfig, discover_modules};

fn module_stem() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

fn write_module(root: &Path, package: &str, stem: &str) {
    let dir = root.join("pkg").join(package);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join(format!("{stem}.py")), "").expect("write");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: discovery output is exactly the set of scanned modules
    /// when no filters are configured, regardless of creation order
    #[test]
    fn unfiltered_discovery_matches_written_modules(
        stems in proptest::collection::btree_set(module_stem(), 1..8),
    ) {
        let tmp = tempfile::tempdir().expect("tempdir");
        // Insertion order differs from the sorted set order.
        for stem in stems.iter().rev() {
            write_module(tmp.path(), "", stem);
        }
        let config = DocgenConfig {
            source_dir: tmp.path().join("pkg"),
            package_root: tmp.path().to_path_buf(),
            ..DocgenConfig::default()
        };
        let discovered = discover_modules(&config).expect("discover");
        let expected: BTreeSet<String> =
            stems.iter().map(|s| format!("pkg.{s}")).collect();
        prop_assert_eq!(discovered, expected);
    }

    /// Property: modules in an ignored package never appear unless
    /// explicitly included
    #[test]
    fn ignored_packages_are_excluded(
        kept in proptest::collection::btree_set(module_stem(), 1..5),
        dropped in proptest::collection::btree_set(module_stem(), 1..5),
    ) {
        let tmp = tempfile::tempdir().expect("tempdir");
        for stem in &kept {
            write_module(tmp.path(), "", stem);
        }
        for stem in &dropped {
            write_module(tmp.path(), "hidden", stem);
        }
        let config = DocgenConfig {
            source_dir: tmp.path().join("pkg"),
            package_root: tmp.path().to_path_buf(),
            ignored_packages: vec!["hidden".to_string()],
            ..DocgenConfig::default()
        };
        let discovered = discover_modules(&config).expect("discover");
        let expected: BTreeSet<String> =
            kept.iter().map(|s| format!("pkg.{s}")).collect();
        prop_assert_eq!(discovered, expected);
    }

    /// Property: discovery twice over an unchanged tree is identical
    #[test]
    fn discovery_is_deterministic(
        stems in proptest::collection::btree_set(module_stem(), 1..6),
    ) {
        let tmp = tempfile::tempdir().expect("tempdir");
        for stem in &stems {
            write_module(tmp.path(), "sub", stem);
        }
        let config = DocgenConfig {
            source_dir: tmp.path().join("pkg"),
            package_root: tmp.path().to_path_buf(),
            ..DocgenConfig::default()
        };
        let first = discover_modules(&config).expect("first");
        let second = discover_modules(&config).expect("second");
        prop_assert_eq!(first, second);
    }
}
