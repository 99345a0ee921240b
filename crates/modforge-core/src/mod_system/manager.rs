use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::ManagerConfig;
use crate::mod_system::activator::{DataPathActivator, ModActivator};
use crate::mod_system::capability::{CapabilityKind, ModProvider};
use crate::mod_system::dependency::Dependency;
use crate::mod_system::error::{ModError, Result};
use crate::mod_system::graph::OrderGraph;
use crate::mod_system::instance::Mod;
use crate::mod_system::loader::ModLoader;

/// Outcome of [`ModManager::load_all`]
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Mods that are loaded after the pass, in load order
    pub loaded: Vec<String>,
    /// Disabled mods that were left untouched
    pub skipped: Vec<String>,
    /// Every mod that ended the pass in `Failed`, with why
    pub errors: BTreeMap<String, ModError>,
}

impl LoadReport {
    /// True iff no mod failed during the pass
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Owns every discovered [`Mod`], computes the load order and drives the
/// load/unload lifecycle along it.
///
/// The manager is the only mutator of its registry. References handed out by
/// the query methods must not be held across `discover`, `load_all` or
/// `unload_all`, which the borrow checker enforces. Calling back into the
/// manager from a [`ModActivator`] is not supported.
pub struct ModManager {
    loader: ModLoader,
    activator: Box<dyn ModActivator>,
    mods: HashMap<String, Mod>,
    /// Ids in the order they were first registered
    discovery_order: Vec<String>,
    /// Cleared whenever a mod is registered
    load_order: Option<Vec<String>>,
    /// Most recent successfully computed order. Survives registration so
    /// `unload_all` always walks the order mods were actually loaded in.
    last_order: Vec<String>,
    /// Ids disabled as soon as they are discovered
    disabled_on_discovery: Vec<String>,
}

impl ModManager {
    /// Create a manager with a JSON manifest loader and the default activator
    pub fn new() -> Self {
        Self::with_loader(ModLoader::new())
    }

    pub fn with_loader(loader: ModLoader) -> Self {
        Self {
            loader,
            activator: Box::new(DataPathActivator),
            mods: HashMap::new(),
            discovery_order: Vec::new(),
            load_order: None,
            last_order: Vec::new(),
            disabled_on_discovery: Vec::new(),
        }
    }

    /// Create a manager from a configuration file's settings
    pub fn from_config(config: &ManagerConfig) -> Self {
        let mut loader = ModLoader::for_manifest_filename(&config.manifest_filename);
        for path in &config.search_paths {
            loader.add_search_path(path);
        }
        let mut manager = Self::with_loader(loader);
        manager.disabled_on_discovery = config.disabled.clone();
        manager
    }

    /// Replace the load-execution collaborator
    pub fn set_activator(&mut self, activator: Box<dyn ModActivator>) {
        self.activator = activator;
    }

    pub fn loader(&self) -> &ModLoader {
        &self.loader
    }

    pub fn add_search_path<P: AsRef<Path>>(&mut self, dir: P) {
        self.loader.add_search_path(dir);
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        self.loader.search_paths()
    }

    /// Register a mod directly. The first registration of an id wins; a
    /// second one is rejected with `DuplicateId`.
    pub fn register_mod(&mut self, m: Mod) -> Result<()> {
        if let Some(existing) = self.mods.get(m.id()) {
            return Err(ModError::DuplicateId {
                id: m.id().to_string(),
                existing: existing.base_path().to_path_buf(),
                rejected: m.base_path().to_path_buf(),
            });
        }

        let id = m.id().to_string();
        debug!("Registered mod '{}' from {}", id, m.base_path().display());
        self.discovery_order.push(id.clone());
        self.mods.insert(id, m);
        self.load_order = None;
        Ok(())
    }

    /// Scan every search path in order and register the mods found.
    ///
    /// Returns how many mods were newly registered. Duplicate ids are logged
    /// and skipped. An unreadable search path aborts the call.
    pub fn discover(&mut self) -> Result<usize> {
        let paths = self.loader.search_paths().to_vec();
        let mut count = 0;

        for path in &paths {
            let found = self.loader.discover_at(path)?;
            for mut m in found {
                if self.disabled_on_discovery.iter().any(|id| id == m.id()) {
                    m.set_enabled(false);
                }
                match self.register_mod(m) {
                    Ok(()) => count += 1,
                    Err(e) => warn!("{}", e),
                }
            }
        }

        info!("Discovered {} new mod(s), {} total", count, self.mods.len());
        Ok(count)
    }

    /// Build the ordering graph over every registered mod, in discovery order
    pub fn order_graph(&self) -> OrderGraph {
        OrderGraph::build(
            self.discovery_order
                .iter()
                .filter_map(|id| self.mods.get(id))
                .map(|m| m.manifest()),
        )
    }

    /// Compute the load order, or return the cached one.
    ///
    /// Disabled mods are part of the order; they are skipped at load time.
    pub fn get_load_order(&mut self) -> Result<Vec<String>> {
        if let Some(order) = &self.load_order {
            return Ok(order.clone());
        }
        let order = self.order_graph().sort()?;
        self.load_order = Some(order.clone());
        self.last_order = order.clone();
        Ok(order)
    }

    /// The last computed load order, if it is still valid
    pub fn cached_load_order(&self) -> Option<&[String]> {
        self.load_order.as_deref()
    }

    /// Why `dependency` of `m` is unsatisfied, if it is.
    ///
    /// With `require_loaded` the dependency must also already be `Loaded`.
    fn dependency_issue(&self, m: &Mod, dependency: &Dependency, require_loaded: bool) -> Option<ModError> {
        let mod_id = m.id().to_string();
        let dep_id = dependency.mod_id.clone();

        let Some(dep) = self.mods.get(&dependency.mod_id) else {
            return Some(ModError::MissingDependency { mod_id, dependency: dep_id });
        };
        if !dep.is_enabled() {
            return Some(ModError::DependencyDisabled { mod_id, dependency: dep_id });
        }
        match dependency.accepts_version(dep.manifest().version()) {
            Ok(true) => {}
            Ok(false) => {
                return Some(ModError::IncompatibleVersion {
                    mod_id,
                    dependency: dep_id,
                    required: dependency.min_version.clone().unwrap_or_default(),
                    found: dep.manifest().version().to_string(),
                });
            }
            Err(e) => return Some(ModError::Version(e)),
        }
        if require_loaded && !dep.is_loaded() {
            return Some(ModError::DependencyNotLoaded { mod_id, dependency: dep_id });
        }
        None
    }

    fn first_unmet_dependency(&self, m: &Mod) -> Option<ModError> {
        m.manifest()
            .required_dependencies()
            .filter(|d| d.mod_id != m.id())
            .find_map(|d| self.dependency_issue(m, d, true))
    }

    /// Load every enabled mod in load order.
    ///
    /// Only a failed ordering (a cycle) fails the whole call. A mod whose
    /// required dependency is missing, disabled, too old or not loaded is
    /// marked `Failed` without running its own load step; everything
    /// independent of it still loads.
    pub fn load_all(&mut self) -> Result<LoadReport> {
        let order = self.get_load_order()?;
        let mut report = LoadReport::default();

        for id in &order {
            let Some(m) = self.mods.get(id) else {
                continue;
            };
            if !m.is_enabled() {
                debug!("Mod '{}' is disabled, skipping", id);
                report.skipped.push(id.clone());
                continue;
            }
            if m.is_loaded() {
                report.loaded.push(id.clone());
                continue;
            }

            let unmet = self.first_unmet_dependency(m);
            let Some(m) = self.mods.get_mut(id) else {
                continue;
            };
            if let Some(err) = unmet {
                m.fail(&err);
                report.errors.insert(id.clone(), err);
                continue;
            }

            match m.load(self.activator.as_ref()) {
                Ok(()) => report.loaded.push(id.clone()),
                Err(err) => {
                    warn!("{}", err);
                    report.errors.insert(id.clone(), err);
                }
            }
        }

        info!(
            "Load pass finished: {} loaded, {} skipped, {} failed",
            report.loaded.len(),
            report.skipped.len(),
            report.errors.len()
        );
        Ok(report)
    }

    /// Unload every loaded mod in reverse of the most recently computed load
    /// order. Returns the ids unloaded.
    ///
    /// The order is not recomputed here. Mods registered since then, even ones
    /// forming a cycle, never change the teardown order of loaded mods.
    pub fn unload_all(&mut self) -> Vec<String> {
        let order = self.last_order.clone();

        let mut unloaded = Vec::new();
        for id in order.iter().rev() {
            if let Some(m) = self.mods.get_mut(id) {
                if m.is_loaded() {
                    m.unload(self.activator.as_ref());
                    unloaded.push(id.clone());
                }
            }
        }
        unloaded
    }

    /// Enable a mod. Returns false if the id is unknown.
    pub fn enable_mod(&mut self, id: &str) -> bool {
        self.set_enabled(id, true)
    }

    /// Disable a mod. Returns false if the id is unknown. Neither loads nor
    /// unloads anything, and dependents are left alone.
    pub fn disable_mod(&mut self, id: &str) -> bool {
        self.set_enabled(id, false)
    }

    fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.mods.get_mut(id) {
            Some(m) => {
                m.set_enabled(enabled);
                info!("Mod '{}' {}", id, if enabled { "enabled" } else { "disabled" });
                true
            }
            None => false,
        }
    }

    /// Attach a provider object to a registered mod
    pub fn attach_provider(&mut self, id: &str, provider: Box<dyn ModProvider>) -> Result<()> {
        let m = self
            .mods
            .get_mut(id)
            .ok_or_else(|| ModError::UnknownMod(id.to_string()))?;
        m.add_provider(provider);
        Ok(())
    }

    pub fn get_mod(&self, id: &str) -> Option<&Mod> {
        self.mods.get(id)
    }

    pub fn has_mod(&self, id: &str) -> bool {
        self.mods.contains_key(id)
    }

    /// All mods, in discovery order
    pub fn get_mods(&self) -> Vec<&Mod> {
        self.discovery_order
            .iter()
            .filter_map(|id| self.mods.get(id))
            .collect()
    }

    pub fn mod_count(&self) -> usize {
        self.mods.len()
    }

    /// Loaded mods, in load order
    pub fn get_loaded_mods(&self) -> Vec<&Mod> {
        self.last_order
            .iter()
            .filter_map(|id| self.mods.get(id))
            .filter(|m| m.is_loaded())
            .collect()
    }

    pub fn is_mod_loaded(&self, id: &str) -> bool {
        self.mods.get(id).is_some_and(|m| m.is_loaded())
    }

    /// Providers of `kind` contributed by loaded mods, in load order
    pub fn providers(&self, kind: CapabilityKind) -> Vec<(&str, &dyn ModProvider)> {
        self.get_loaded_mods()
            .into_iter()
            .flat_map(|m| m.providers(kind).map(move |p| (m.id(), p)))
            .collect()
    }

    /// Report unmet required dependencies of enabled mods without loading
    /// anything: missing, disabled or too old.
    pub fn check_dependencies(&self) -> Vec<ModError> {
        self.get_mods()
            .into_iter()
            .filter(|m| m.is_enabled())
            .flat_map(|m| {
                m.manifest()
                    .required_dependencies()
                    .filter(|d| d.mod_id != m.id())
                    .filter_map(|d| self.dependency_issue(m, d, false))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

impl Default for ModManager {
    fn default() -> Self {
        Self::new()
    }
}
