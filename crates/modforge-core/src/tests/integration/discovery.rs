#![cfg(test)]

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use super::common::{write_mod, write_simple_mod};
use crate::config::ManagerConfig;
use crate::mod_system::error::ModError;
use crate::mod_system::manifest::{ModPriority, ModType};
use crate::mod_system::ModManager;

#[test]
fn test_discover_and_order_a_mod_tree() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_mod(root, "00_ui", "ui", json!({
        "priority": "high",
        "dependencies": ["core", { "id": "theme", "optional": true }],
    }));
    write_mod(root, "01_core", "core", json!({ "priority": "low", "type": "script" }));
    write_mod(root, "02_theme", "theme", json!({ "load_after": ["core"] }));
    write_mod(root, "03_patch", "patch", json!({ "priority": "critical", "load_before": ["core"] }));
    fs::create_dir(root.join("04_readme_only")).unwrap();
    fs::write(root.join("04_readme_only/README.md"), "no manifest here").unwrap();

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    assert_eq!(manager.discover().unwrap(), 4);

    let core = manager.get_mod("core").unwrap();
    assert_eq!(core.manifest().mod_type(), ModType::Script);
    assert_eq!(core.manifest().priority(), ModPriority::Low);

    let order = manager.get_load_order().unwrap();
    assert_eq!(order, vec!["patch", "core", "theme", "ui"]);
}

#[test]
fn test_bad_manifests_only_drop_their_own_mod() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_simple_mod(root, "good");
    write_mod(root, "no_id", "", json!({}));
    write_mod(root, "bad_priority", "bad", json!({ "priority": "urgent" }));
    write_mod(root, "bad_version", "badver", json!({ "dependencies": [{ "id": "good", "min_version": "x.y" }] }));

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    assert_eq!(manager.discover().unwrap(), 1);
    assert!(manager.has_mod("good"));
}

#[test]
fn test_same_id_across_directories_keeps_first() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_mod(root, "a_copy", "dup", json!({ "version": "1.0.0" }));
    write_mod(root, "b_copy", "dup", json!({ "version": "9.9.9" }));

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    assert_eq!(manager.discover().unwrap(), 1);
    assert_eq!(manager.get_mod("dup").unwrap().manifest().version(), "1.0.0");
}

#[test]
fn test_discover_from_config_file() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_simple_mod(&root.join("mods"), "alpha");
    write_simple_mod(&root.join("mods"), "beta");

    let config_path = root.join("modforge.json");
    fs::write(
        &config_path,
        r#"{ "search_paths": ["mods"], "disabled": ["beta"] }"#,
    )
    .unwrap();

    let config = ManagerConfig::from_file(&config_path).unwrap();
    let mut manager = ModManager::from_config(&config);
    assert_eq!(manager.discover().unwrap(), 2);
    assert!(manager.get_mod("alpha").unwrap().is_enabled());
    assert!(!manager.get_mod("beta").unwrap().is_enabled());
}

#[test]
fn test_cycle_on_disk_is_reported_with_members() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_mod(root, "a", "a", json!({ "dependencies": ["b"] }));
    write_mod(root, "b", "b", json!({ "load_after": ["a"] }));
    write_simple_mod(root, "c");

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    manager.discover().unwrap();

    match manager.get_load_order() {
        Err(ModError::CyclicDependency(ids)) => assert_eq!(ids, vec!["a", "b"]),
        other => panic!("expected CyclicDependency, got {:?}", other),
    }
}
