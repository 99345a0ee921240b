use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Check if a path exists and is a file
pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Check if a path exists and is a directory
pub fn is_dir<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

/// List the immediate subdirectories of `path`, sorted by path so the result
/// is stable across runs and platforms.
///
/// Entries whose metadata cannot be read are skipped; failing to read `path`
/// itself is an error.
pub fn list_subdirectories<P: AsRef<Path>>(path: P) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();

    for entry in fs::read_dir(path.as_ref())? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry in {}: {}", path.as_ref().display(), e);
                continue;
            }
        };
        let entry_path = entry.path();
        // Follows symlinks so linked mod folders are picked up too
        if is_dir(&entry_path) {
            result.push(entry_path);
        }
    }

    result.sort();
    Ok(result)
}

/// True if `path` is relative and never climbs out of the directory it is
/// joined onto (no `..`, no root or prefix components).
pub fn is_contained_relative(path: &Path) -> bool {
    if path.as_os_str().is_empty() {
        return false;
    }
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
