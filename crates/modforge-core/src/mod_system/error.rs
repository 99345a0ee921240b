//! # Modforge Mod System Errors
//!
//! Defines error types specific to the mod system.
//!
//! [`ModError`] is the primary enum covering discovery, manifest parsing,
//! ordering and load failures. [`ManifestParseError`] is produced by manifest
//! parsers and [`ActivationError`] by the load-execution collaborator; both are
//! wrapped into [`ModError`] with the path or mod id they relate to.
use std::path::PathBuf;
use thiserror::Error;

use crate::mod_system::version::VersionError;

#[derive(Debug, Error)]
pub enum ModError {
    #[error("Manifest not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed manifest '{}': {message}", path.display())]
    ParseError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<ManifestParseError>,
    },

    #[error("Duplicate mod id '{id}': already registered from '{}', ignoring '{}'", existing.display(), rejected.display())]
    DuplicateId {
        id: String,
        existing: PathBuf,
        rejected: PathBuf,
    },

    #[error("Mod '{mod_id}' requires '{dependency}', which is not installed")]
    MissingDependency { mod_id: String, dependency: String },

    #[error("Mod '{mod_id}' requires '{dependency}', which is disabled")]
    DependencyDisabled { mod_id: String, dependency: String },

    #[error("Mod '{mod_id}' requires '{dependency}', which did not load")]
    DependencyNotLoaded { mod_id: String, dependency: String },

    #[error("Mod '{mod_id}' requires '{dependency}' >= {required} but found {found}")]
    IncompatibleVersion {
        mod_id: String,
        dependency: String,
        required: String,
        found: String,
    },

    #[error("Circular load order among: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),

    #[error("Mod '{mod_id}' failed to load: {source}")]
    LoadFailure {
        mod_id: String,
        #[source]
        source: ActivationError,
    },

    #[error("Unknown mod: {0}")]
    UnknownMod(String),

    #[error("I/O error during '{operation}' on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    #[error("Configuration error in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ModError {
    /// Helper to build an `Io` error with operation and path context
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ModError::Io {
            source,
            operation: operation.into(),
            path: path.into(),
        }
    }

    /// Whether this error is a failed ordering (no valid load order exists)
    pub fn is_cycle(&self) -> bool {
        matches!(self, ModError::CyclicDependency(_))
    }
}

/// Error returned by a [`ManifestParser`](crate::mod_system::parser::ManifestParser)
#[derive(Debug, Error)]
pub enum ManifestParseError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "toml-config")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Manifest is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: &'static str, message: String },
}

/// Error returned by a [`ModActivator`](crate::mod_system::activator::ModActivator)
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("Path '{path}' must be relative and stay inside the mod directory")]
    UnsafePath { path: String },
    #[error("{kind} '{}' does not exist", path.display())]
    MissingPath { kind: &'static str, path: PathBuf },
    #[error("{0}")]
    Other(String),
}

/// Shorthand for Result with the mod system error type
pub type Result<T> = std::result::Result<T, ModError>;
