//! Shared fixtures for tests that need mod directories on disk.
#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::mod_system::manifest::{ManifestBuilder, ModPriority};
use crate::mod_system::Mod;

/// Write `<root>/<dir_name>/mod.json` with the given id plus any extra fields
/// and return the mod directory.
pub fn write_mod(root: &Path, dir_name: &str, id: &str, extra: Value) -> PathBuf {
    let mut manifest = json!({
        "id": id,
        "name": format!("{} mod", id),
        "version": "1.0.0",
    });
    if let (Some(target), Value::Object(fields)) = (manifest.as_object_mut(), extra) {
        target.extend(fields);
    }

    let mod_dir = root.join(dir_name);
    fs::create_dir_all(&mod_dir).expect("create mod dir");
    fs::write(
        mod_dir.join("mod.json"),
        serde_json::to_vec_pretty(&manifest).expect("serialize manifest"),
    )
    .expect("write manifest");
    mod_dir
}

/// Write a bare mod whose directory name equals its id
pub fn write_simple_mod(root: &Path, id: &str) -> PathBuf {
    write_mod(root, id, id, json!({}))
}

/// In-memory mod with the given priority
pub fn mem_mod(id: &str, priority: ModPriority) -> Mod {
    Mod::new(
        ManifestBuilder::new(id, id, "1.0.0").priority(priority).build(),
        format!("/virtual/{}", id),
    )
}

/// In-memory mod built from a customised builder
pub fn mem_mod_with(builder: ManifestBuilder) -> Mod {
    let manifest = builder.build();
    let base = format!("/virtual/{}", manifest.id());
    Mod::new(manifest, base)
}
