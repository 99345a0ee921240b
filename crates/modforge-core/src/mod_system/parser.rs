use serde::Deserialize;

use crate::constants::DEFAULT_MANIFEST_FILENAME;
#[cfg(feature = "toml-config")]
use crate::constants::TOML_MANIFEST_FILENAME;
use crate::mod_system::dependency::Dependency;
use crate::mod_system::error::ManifestParseError;
use crate::mod_system::manifest::{Manifest, ModPriority, ModType};
use crate::mod_system::version::parse_version;

/// Turns the raw bytes of a manifest file into a [`Manifest`].
///
/// The loader owns file access; parsers only ever see the file contents.
pub trait ManifestParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Manifest, ManifestParseError>;

    /// File name this parser expects inside a mod directory
    fn default_filename(&self) -> &str;
}

// --- Intermediate structs for deserialization ---

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum RawDependency {
    /// Shorthand: a bare id is a required dependency on any version
    Id(String),
    Full {
        id: String,
        #[serde(default)]
        min_version: Option<String>,
        #[serde(default)]
        optional: bool,
    },
}

#[derive(Deserialize, Debug)]
struct RawManifest {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default, rename = "type", alias = "mod_type")]
    mod_type: ModType,
    #[serde(default)]
    priority: ModPriority,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
    #[serde(default)]
    load_after: Vec<String>,
    #[serde(default)]
    load_before: Vec<String>,
    #[serde(default)]
    data_path: Option<String>,
    #[serde(default)]
    entry_point: Option<String>,
}

// --- End Intermediate structs ---

impl RawManifest {
    fn into_manifest(self) -> Result<Manifest, ManifestParseError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ManifestParseError::InvalidField {
                field: "id",
                message: "must not be empty".to_string(),
            });
        }

        let mut manifest = Manifest::new(id, &self.name, &self.version);
        manifest
            .set_description(self.description.as_deref())
            .set_author(self.author.as_deref())
            .set_mod_type(self.mod_type)
            .set_priority(self.priority)
            .set_data_path(self.data_path.as_deref())
            .set_entry_point(self.entry_point.as_deref());

        for raw_dep in self.dependencies {
            let dependency = match raw_dep {
                RawDependency::Id(dep_id) => Dependency::required(&dep_id),
                RawDependency::Full { id: dep_id, min_version, optional } => {
                    if let Some(min) = &min_version {
                        parse_version(min).map_err(|e| ManifestParseError::InvalidField {
                            field: "dependencies",
                            message: format!("min_version of '{}': {}", dep_id, e),
                        })?;
                    }
                    Dependency::new(&dep_id, min_version.as_deref(), optional)
                }
            };
            manifest.push_dependency(dependency);
        }
        for after in &self.load_after {
            manifest.add_load_after(after);
        }
        for before in &self.load_before {
            manifest.add_load_before(before);
        }

        Ok(manifest)
    }
}

/// Parses `mod.json` manifests
#[derive(Debug, Clone, Default)]
pub struct JsonManifestParser;

impl ManifestParser for JsonManifestParser {
    fn parse(&self, bytes: &[u8]) -> Result<Manifest, ManifestParseError> {
        let raw: RawManifest = serde_json::from_slice(bytes)?;
        raw.into_manifest()
    }

    fn default_filename(&self) -> &str {
        DEFAULT_MANIFEST_FILENAME
    }
}

/// Parses `mod.toml` manifests
#[cfg(feature = "toml-config")]
#[derive(Debug, Clone, Default)]
pub struct TomlManifestParser;

#[cfg(feature = "toml-config")]
impl ManifestParser for TomlManifestParser {
    fn parse(&self, bytes: &[u8]) -> Result<Manifest, ManifestParseError> {
        let text = std::str::from_utf8(bytes)?;
        let raw: RawManifest = toml::from_str(text)?;
        raw.into_manifest()
    }

    fn default_filename(&self) -> &str {
        TOML_MANIFEST_FILENAME
    }
}
