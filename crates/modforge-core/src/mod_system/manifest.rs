use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::mod_system::dependency::Dependency;

/// Kind of content a mod ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModType {
    /// Pure data (definitions, tables, localisation)
    #[default]
    Data,
    /// Ships an entry point script
    Script,
    /// Overrides or adds assets
    Asset,
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModType::Data => "data",
            ModType::Script => "script",
            ModType::Asset => "asset",
        };
        f.write_str(s)
    }
}

impl FromStr for ModType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data" => Ok(ModType::Data),
            "script" => Ok(ModType::Script),
            "asset" => Ok(ModType::Asset),
            other => Err(format!("unknown mod type '{}'", other)),
        }
    }
}

/// Coarse load priority. Only breaks ties between otherwise unconstrained mods;
/// `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModPriority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl fmt::Display for ModPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModPriority::Low => "low",
            ModPriority::Normal => "normal",
            ModPriority::High => "high",
            ModPriority::Critical => "critical",
        };
        f.write_str(s)
    }
}

impl FromStr for ModPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ModPriority::Low),
            "normal" => Ok(ModPriority::Normal),
            "high" => Ok(ModPriority::High),
            "critical" => Ok(ModPriority::Critical),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// Declarative description of a mod: identity, version, dependencies and
/// ordering hints.
///
/// No validation happens here; self references and unknown ids are dealt with
/// by the manager when it builds the load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    id: String,
    name: String,
    version: String,
    description: Option<String>,
    author: Option<String>,
    mod_type: ModType,
    priority: ModPriority,
    dependencies: Vec<Dependency>,
    load_after: BTreeSet<String>,
    load_before: BTreeSet<String>,
    data_path: Option<String>,
    entry_point: Option<String>,
}

impl Manifest {
    /// Create a new manifest with default priority and no dependencies
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            author: None,
            mod_type: ModType::default(),
            priority: ModPriority::default(),
            dependencies: Vec::new(),
            load_after: BTreeSet::new(),
            load_before: BTreeSet::new(),
            data_path: None,
            entry_point: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: &str) -> &mut Self {
        self.id = id.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = name.to_string();
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: &str) -> &mut Self {
        self.version = version.to_string();
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<&str>) -> &mut Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn set_author(&mut self, author: Option<&str>) -> &mut Self {
        self.author = author.map(str::to_string);
        self
    }

    pub fn mod_type(&self) -> ModType {
        self.mod_type
    }

    pub fn set_mod_type(&mut self, mod_type: ModType) -> &mut Self {
        self.mod_type = mod_type;
        self
    }

    pub fn priority(&self) -> ModPriority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: ModPriority) -> &mut Self {
        self.priority = priority;
        self
    }

    pub fn data_path(&self) -> Option<&str> {
        self.data_path.as_deref()
    }

    pub fn set_data_path(&mut self, data_path: Option<&str>) -> &mut Self {
        self.data_path = data_path.map(str::to_string);
        self
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }

    pub fn set_entry_point(&mut self, entry_point: Option<&str>) -> &mut Self {
        self.entry_point = entry_point.map(str::to_string);
        self
    }

    /// Add a dependency. Declaration order is kept.
    pub fn add_dependency(&mut self, mod_id: &str, min_version: Option<&str>, optional: bool) -> &mut Self {
        self.dependencies.push(Dependency::new(mod_id, min_version, optional));
        self
    }

    /// Add a prepared dependency entry
    pub fn push_dependency(&mut self, dependency: Dependency) -> &mut Self {
        self.dependencies.push(dependency);
        self
    }

    /// Whether any dependency (required or optional) names `mod_id`
    pub fn has_dependency(&self, mod_id: &str) -> bool {
        self.dependencies.iter().any(|d| d.mod_id == mod_id)
    }

    pub fn get_dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    /// Iterate over the dependencies that block loading
    pub fn required_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().filter(|d| d.is_required())
    }

    /// This mod must load after `mod_id`
    pub fn add_load_after(&mut self, mod_id: &str) -> &mut Self {
        self.load_after.insert(mod_id.to_string());
        self
    }

    /// This mod must load before `mod_id`
    pub fn add_load_before(&mut self, mod_id: &str) -> &mut Self {
        self.load_before.insert(mod_id.to_string());
        self
    }

    pub fn get_load_after(&self) -> &BTreeSet<String> {
        &self.load_after
    }

    pub fn get_load_before(&self) -> &BTreeSet<String> {
        &self.load_before
    }
}

/// Builder for creating a manifest
pub struct ManifestBuilder {
    manifest: Manifest,
}

impl ManifestBuilder {
    /// Create a new manifest builder
    pub fn new(id: &str, name: &str, version: &str) -> Self {
        Self {
            manifest: Manifest::new(id, name, version),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.manifest.set_description(Some(description));
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.manifest.set_author(Some(author));
        self
    }

    pub fn mod_type(mut self, mod_type: ModType) -> Self {
        self.manifest.set_mod_type(mod_type);
        self
    }

    pub fn priority(mut self, priority: ModPriority) -> Self {
        self.manifest.set_priority(priority);
        self
    }

    /// Add a required dependency
    pub fn requires(mut self, mod_id: &str, min_version: Option<&str>) -> Self {
        self.manifest.add_dependency(mod_id, min_version, false);
        self
    }

    /// Add an optional dependency
    pub fn optional(mut self, mod_id: &str) -> Self {
        self.manifest.add_dependency(mod_id, None, true);
        self
    }

    pub fn load_after(mut self, mod_id: &str) -> Self {
        self.manifest.add_load_after(mod_id);
        self
    }

    pub fn load_before(mut self, mod_id: &str) -> Self {
        self.manifest.add_load_before(mod_id);
        self
    }

    pub fn data_path(mut self, data_path: &str) -> Self {
        self.manifest.set_data_path(Some(data_path));
        self
    }

    pub fn entry_point(mut self, entry_point: &str) -> Self {
        self.manifest.set_entry_point(Some(entry_point));
        self
    }

    /// Build the manifest
    pub fn build(self) -> Manifest {
        self.manifest
    }
}
