use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::mod_system::activator::ModActivator;
use crate::mod_system::capability::{CapabilityKind, ModProvider};
use crate::mod_system::error::{ModError, Result};
use crate::mod_system::manifest::Manifest;

/// Lifecycle state of a [`Mod`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModState {
    /// Found on disk, never loaded
    Discovered,
    Loaded,
    Unloaded,
    /// The last load attempt failed, with the reason
    Failed(String),
}

impl fmt::Display for ModState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModState::Discovered => f.write_str("discovered"),
            ModState::Loaded => f.write_str("loaded"),
            ModState::Unloaded => f.write_str("unloaded"),
            ModState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// A discovered mod: its manifest, where it lives, whether it is enabled and
/// where it is in its lifecycle.
pub struct Mod {
    id: String,
    base_path: PathBuf,
    manifest: Manifest,
    state: ModState,
    enabled: bool,
    providers: Vec<Box<dyn ModProvider>>,
}

impl Mod {
    /// Create a mod in the `Discovered` state. The id is taken from the manifest.
    pub fn new(manifest: Manifest, base_path: impl Into<PathBuf>) -> Self {
        Self {
            id: manifest.id().to_string(),
            base_path: base_path.into(),
            manifest,
            state: ModState::Discovered,
            enabled: true,
            providers: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn state(&self) -> &ModState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == ModState::Loaded
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ModState::Failed(_))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Metadata only: does not load or unload anything
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Run the activator and move to `Loaded`, or to `Failed` with the reason.
    ///
    /// Loading an already loaded mod is a no-op. A failed mod may be retried.
    pub fn load(&mut self, activator: &dyn ModActivator) -> Result<()> {
        if self.is_loaded() {
            return Ok(());
        }

        match activator.activate(&self.manifest, &self.base_path) {
            Ok(()) => {
                self.state = ModState::Loaded;
                info!("Loaded mod '{}' v{}", self.id, self.manifest.version());
                Ok(())
            }
            Err(source) => {
                let err = ModError::LoadFailure {
                    mod_id: self.id.clone(),
                    source,
                };
                self.state = ModState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Move a loaded mod to `Unloaded`. Does nothing in any other state.
    pub fn unload(&mut self, activator: &dyn ModActivator) {
        if !self.is_loaded() {
            return;
        }
        activator.deactivate(&self.manifest, &self.base_path);
        self.state = ModState::Unloaded;
        info!("Unloaded mod '{}'", self.id);
    }

    /// Mark the mod failed without running its own load step
    pub(crate) fn fail(&mut self, reason: &ModError) {
        warn!("Mod '{}' not loaded: {}", self.id, reason);
        self.state = ModState::Failed(reason.to_string());
    }

    /// Attach a provider object contributed by this mod
    pub fn add_provider(&mut self, provider: Box<dyn ModProvider>) {
        self.providers.push(provider);
    }

    /// Providers of one capability kind, in the order they were added
    pub fn providers(&self, kind: CapabilityKind) -> impl Iterator<Item = &dyn ModProvider> {
        self.providers
            .iter()
            .filter(move |p| p.kind() == kind)
            .map(|p| p.as_ref() as &dyn ModProvider)
    }

    /// Capability kinds this mod provides, without duplicates
    pub fn capabilities(&self) -> Vec<CapabilityKind> {
        let mut kinds: Vec<CapabilityKind> = self.providers.iter().map(|p| p.kind()).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    pub fn has_capability(&self, kind: CapabilityKind) -> bool {
        self.providers.iter().any(|p| p.kind() == kind)
    }
}

impl fmt::Debug for Mod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mod")
            .field("id", &self.id)
            .field("base_path", &self.base_path)
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("capabilities", &self.capabilities())
            .finish()
    }
}
