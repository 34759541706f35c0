//! Settings persistence round trips

use provkit_core::docgen::DocgenConfig;
use provkit_core::settings::{HostEntry, Settings};

#[test]
fn full_settings_round_trip_preserves_docgen_config() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.toml");

    let settings = Settings {
        hosts: vec![
            HostEntry {
                name: "mgmt".to_string(),
                host: "mgmt.cluster.local".to_string(),
                port: 22,
                username: "op".to_string(),
            },
            HostEntry {
                name: "data1".to_string(),
                host: "10.1.0.11".to_string(),
                port: 2200,
                username: "op".to_string(),
            },
        ],
        docgen: DocgenConfig {
            ignored_packages: vec!["internal".to_string(), "vendor".to_string()],
            included: vec!["pkg.internal.containers".to_string()],
            ..DocgenConfig::default()
        },
    };
    settings.save(&path).expect("save");

    let loaded = Settings::load(&path).expect("load");
    assert_eq!(loaded.hosts, settings.hosts);
    assert_eq!(loaded.docgen.ignored_packages, settings.docgen.ignored_packages);
    assert_eq!(loaded.docgen.included, settings.docgen.included);
    assert_eq!(loaded.docgen.module_suffix, ".py");
}
