use std::path::Path;

use log::debug;

use crate::mod_system::error::ActivationError;
use crate::mod_system::manifest::Manifest;
use crate::utils::fs::is_contained_relative;

/// Load-execution collaborator invoked by [`Mod::load`](crate::mod_system::Mod::load).
///
/// The mod system only cares about the pass/fail outcome. Running entry
/// points or wiring data paths into other subsystems is up to the implementor.
/// Implementations must not call back into the owning manager.
pub trait ModActivator {
    fn activate(&self, manifest: &Manifest, base_path: &Path) -> Result<(), ActivationError>;

    /// Undo whatever `activate` did. Failures are the implementor's to report.
    fn deactivate(&self, _manifest: &Manifest, _base_path: &Path) {}
}

/// Activator that accepts every mod
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopActivator;

impl ModActivator for NoopActivator {
    fn activate(&self, _manifest: &Manifest, _base_path: &Path) -> Result<(), ActivationError> {
        Ok(())
    }
}

/// Default activator: checks that a declared data path and entry point are
/// relative, stay inside the mod directory and exist on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataPathActivator;

impl DataPathActivator {
    fn check_path(base_path: &Path, kind: &'static str, relative: &str) -> Result<(), ActivationError> {
        if !is_contained_relative(Path::new(relative)) {
            return Err(ActivationError::UnsafePath {
                path: relative.to_string(),
            });
        }
        let full = base_path.join(relative);
        if !full.exists() {
            return Err(ActivationError::MissingPath { kind, path: full });
        }
        Ok(())
    }
}

impl ModActivator for DataPathActivator {
    fn activate(&self, manifest: &Manifest, base_path: &Path) -> Result<(), ActivationError> {
        if let Some(data_path) = manifest.data_path() {
            Self::check_path(base_path, "Data path", data_path)?;
        }
        if let Some(entry_point) = manifest.entry_point() {
            Self::check_path(base_path, "Entry point", entry_point)?;
        }
        debug!("Activated mod '{}' from {}", manifest.id(), base_path.display());
        Ok(())
    }

    fn deactivate(&self, manifest: &Manifest, _base_path: &Path) {
        debug!("Deactivated mod '{}'", manifest.id());
    }
}
