use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::mod_system::error::{ModError, Result};
use crate::mod_system::instance::Mod;
use crate::mod_system::parser::{JsonManifestParser, ManifestParser};
#[cfg(feature = "toml-config")]
use crate::mod_system::parser::TomlManifestParser;
use crate::utils::fs::{is_file, list_subdirectories};

/// Resolves mod directories on disk into [`Mod`]s
pub struct ModLoader {
    /// Directories whose immediate subdirectories are mods
    search_paths: Vec<PathBuf>,
    /// File looked up inside each mod directory
    manifest_filename: String,
    parser: Box<dyn ManifestParser>,
}

impl ModLoader {
    /// Create a loader reading `mod.json` manifests
    pub fn new() -> Self {
        Self::with_parser(Box::new(JsonManifestParser))
    }

    /// Create a loader around a specific manifest parser, using its default file name
    pub fn with_parser(parser: Box<dyn ManifestParser>) -> Self {
        Self {
            search_paths: Vec::new(),
            manifest_filename: parser.default_filename().to_string(),
            parser,
        }
    }

    /// Create a loader for `filename`, choosing the parser from its extension
    pub fn for_manifest_filename(filename: &str) -> Self {
        let mut loader = match Path::new(filename).extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml-config")]
            Some("toml") => Self::with_parser(Box::new(TomlManifestParser)),
            _ => Self::new(),
        };
        loader.set_manifest_filename(filename);
        loader
    }

    pub fn manifest_filename(&self) -> &str {
        &self.manifest_filename
    }

    pub fn set_manifest_filename(&mut self, filename: &str) {
        self.manifest_filename = filename.to_string();
    }

    /// Append a search path. Order is kept and duplicates are not removed.
    pub fn add_search_path<P: AsRef<Path>>(&mut self, dir: P) {
        self.search_paths.push(dir.as_ref().to_path_buf());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Load the mod rooted at `path`.
    ///
    /// Fails with `NotFound` when the directory has no manifest file and with
    /// `ParseError` when the manifest is malformed.
    pub fn load_mod<P: AsRef<Path>>(&self, path: P) -> Result<Mod> {
        let path = path.as_ref();
        let manifest_path = path.join(&self.manifest_filename);

        if !is_file(&manifest_path) {
            return Err(ModError::NotFound { path: manifest_path });
        }

        let bytes = fs::read(&manifest_path)
            .map_err(|e| ModError::io(e, "read_manifest", &manifest_path))?;

        let manifest = self.parser.parse(&bytes).map_err(|e| ModError::ParseError {
            path: manifest_path.clone(),
            message: e.to_string(),
            source: Some(e),
        })?;

        debug!("Parsed manifest for '{}' at {}", manifest.id(), manifest_path.display());
        Ok(Mod::new(manifest, path))
    }

    /// Load every mod found in the immediate subdirectories of `search_path`.
    ///
    /// Subdirectories without a usable manifest are skipped. Only a failure to
    /// read `search_path` itself is returned as an error.
    pub fn discover_at<P: AsRef<Path>>(&self, search_path: P) -> Result<Vec<Mod>> {
        let search_path = search_path.as_ref();
        let dirs = list_subdirectories(search_path)
            .map_err(|e| ModError::io(e, "read_search_path", search_path))?;

        let mut mods = Vec::new();
        for dir in dirs {
            match self.load_mod(&dir) {
                Ok(m) => mods.push(m),
                Err(ModError::NotFound { .. }) => {
                    debug!("No manifest in {}, skipping", dir.display());
                }
                Err(e) => {
                    warn!("Skipping {}: {}", dir.display(), e);
                }
            }
        }

        info!("Found {} mod(s) in {}", mods.len(), search_path.display());
        Ok(mods)
    }
}

impl Default for ModLoader {
    fn default() -> Self {
        Self::new()
    }
}
