use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MANIFEST_FILENAME;
use crate::mod_system::error::{ModError, Result};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

fn default_manifest_filename() -> String {
    DEFAULT_MANIFEST_FILENAME.to_string()
}

/// Settings for a [`ModManager`](crate::mod_system::ModManager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// File looked up inside every mod directory
    #[serde(default = "default_manifest_filename")]
    pub manifest_filename: String,
    /// Searched in order; not deduplicated
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    /// Mod ids disabled as soon as they are discovered
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            manifest_filename: default_manifest_filename(),
            search_paths: Vec::new(),
            disabled: Vec::new(),
        }
    }
}

impl ManagerConfig {
    /// Parse configuration text in the given format
    pub fn parse(data: &str, format: ConfigFormat) -> std::result::Result<Self, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| format!("Failed to deserialize from JSON: {}", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| format!("Failed to deserialize from YAML: {}", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| format!("Failed to deserialize from TOML: {}", e)),
        }
    }

    /// Serialize to text in the given format
    pub fn serialize(&self, format: ConfigFormat) -> std::result::Result<String, String> {
        match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| format!("Failed to serialize to JSON: {}", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| format!("Failed to serialize to YAML: {}", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| format!("Failed to serialize to TOML: {}", e)),
        }
    }

    /// Load configuration from a file, picking the format from its extension.
    ///
    /// Relative search paths are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ModError::Config {
            path: path.to_path_buf(),
            message: "unsupported configuration format".to_string(),
        })?;
        let data = fs::read_to_string(path).map_err(|e| ModError::io(e, "read_config", path))?;
        let mut config = Self::parse(&data, format).map_err(|message| ModError::Config {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(base) = path.parent() {
            for search_path in &mut config.search_paths {
                if search_path.is_relative() {
                    *search_path = base.join(&*search_path);
                }
            }
        }
        Ok(config)
    }
}
