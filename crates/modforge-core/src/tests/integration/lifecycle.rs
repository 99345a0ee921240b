#![cfg(test)]

use std::fs;

use serde_json::json;
use tempfile::tempdir;

use super::common::{write_mod, write_simple_mod};
use crate::mod_system::error::{ActivationError, ModError};
use crate::mod_system::{ModManager, ModState};

#[test]
fn test_full_lifecycle_with_data_paths() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();

    let core_dir = write_mod(root, "core", "core", json!({ "data_path": "data", "version": "2.1" }));
    fs::create_dir(core_dir.join("data")).unwrap();
    let addon_dir = write_mod(root, "addon", "addon", json!({
        "entry_point": "scripts/main.lua",
        "dependencies": [{ "id": "core", "min_version": "2.0" }],
    }));
    fs::create_dir(addon_dir.join("scripts")).unwrap();
    fs::write(addon_dir.join("scripts/main.lua"), "-- entry").unwrap();

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    assert_eq!(manager.discover().unwrap(), 2);

    let report = manager.load_all().unwrap();
    assert!(report.success(), "unexpected errors: {:?}", report.errors);
    assert_eq!(report.loaded, vec!["core", "addon"]);

    assert_eq!(manager.unload_all(), vec!["addon", "core"]);
    assert_eq!(*manager.get_mod("core").unwrap().state(), ModState::Unloaded);
    assert_eq!(*manager.get_mod("addon").unwrap().state(), ModState::Unloaded);

    // Unloaded mods may be loaded again
    assert!(manager.load_all().unwrap().success());
    assert!(manager.is_mod_loaded("addon"));
}

#[test]
fn test_missing_data_path_fails_mod_and_dependents() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_mod(root, "core", "core", json!({ "data_path": "data" }));
    write_mod(root, "addon", "addon", json!({ "dependencies": ["core"] }));
    write_simple_mod(root, "independent");

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    manager.discover().unwrap();

    let report = manager.load_all().unwrap();
    assert!(!report.success());
    assert_eq!(report.loaded, vec!["independent"]);

    match report.errors.get("core") {
        Some(ModError::LoadFailure { mod_id, source: ActivationError::MissingPath { kind, .. } }) => {
            assert_eq!(mod_id, "core");
            assert_eq!(*kind, "Data path");
        }
        other => panic!("expected LoadFailure, got {:?}", other),
    }
    assert!(matches!(report.errors.get("addon"), Some(ModError::DependencyNotLoaded { .. })));
    assert!(manager.get_mod("addon").unwrap().is_failed());
}

#[test]
fn test_escaping_entry_point_is_rejected() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    fs::write(root.join("outside.lua"), "-- not part of the mod").unwrap();
    write_mod(root, "sneaky", "sneaky", json!({ "entry_point": "../outside.lua" }));

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    manager.discover().unwrap();

    let report = manager.load_all().unwrap();
    assert!(matches!(
        report.errors.get("sneaky"),
        Some(ModError::LoadFailure { source: ActivationError::UnsafePath { .. }, .. })
    ));
    match manager.get_mod("sneaky").unwrap().state() {
        ModState::Failed(reason) => assert!(reason.contains("sneaky")),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[test]
fn test_disable_then_reenable_between_passes() {
    let tmp_dir = tempdir().unwrap();
    let root = tmp_dir.path();
    write_simple_mod(root, "a");
    write_simple_mod(root, "b");

    let mut manager = ModManager::new();
    manager.add_search_path(root);
    manager.discover().unwrap();

    manager.disable_mod("a");
    let report = manager.load_all().unwrap();
    assert_eq!(report.loaded, vec!["b"]);
    assert_eq!(*manager.get_mod("a").unwrap().state(), ModState::Discovered);

    manager.enable_mod("a");
    let report = manager.load_all().unwrap();
    assert_eq!(report.loaded, vec!["a", "b"]);
    assert!(manager.is_mod_loaded("a"));
}

#[test]
fn test_new_discovery_invalidates_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    write_simple_mod(first.path(), "base");
    write_mod(second.path(), "early", "early", json!({ "load_before": ["base"] }));

    let mut manager = ModManager::new();
    manager.add_search_path(first.path());
    manager.discover().unwrap();
    manager.load_all().unwrap();
    assert_eq!(manager.cached_load_order(), Some(&["base".to_string()][..]));

    manager.add_search_path(second.path());
    assert_eq!(manager.discover().unwrap(), 1);
    assert!(manager.cached_load_order().is_none());
    assert_eq!(manager.get_load_order().unwrap(), vec!["early", "base"]);

    // "base" is already loaded; only "early" gets loaded now
    let report = manager.load_all().unwrap();
    assert_eq!(report.loaded, vec!["early", "base"]);
}
