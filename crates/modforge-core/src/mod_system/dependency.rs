use std::fmt;

use serde::Serialize;

use crate::mod_system::version::{satisfies_minimum, VersionError};

/// Represents a dependency on another mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Id of the required mod
    pub mod_id: String,

    /// Lowest acceptable version of the required mod
    pub min_version: Option<String>,

    /// Optional dependencies only influence ordering, never block loading
    pub optional: bool,
}

impl Dependency {
    /// Create a new dependency entry
    pub fn new(mod_id: &str, min_version: Option<&str>, optional: bool) -> Self {
        Self {
            mod_id: mod_id.to_string(),
            min_version: min_version.map(str::to_string),
            optional,
        }
    }

    /// Create a required dependency on any version
    pub fn required(mod_id: &str) -> Self {
        Self::new(mod_id, None, false)
    }

    /// Create an optional dependency on any version
    pub fn optional(mod_id: &str) -> Self {
        Self::new(mod_id, None, true)
    }

    /// Set the minimum version
    pub fn with_min_version(mut self, min_version: &str) -> Self {
        self.min_version = Some(min_version.to_string());
        self
    }

    pub fn is_required(&self) -> bool {
        !self.optional
    }

    /// Check whether the given version of the dependency is acceptable
    pub fn accepts_version(&self, version: &str) -> Result<bool, VersionError> {
        match &self.min_version {
            Some(min) => satisfies_minimum(version, min),
            None => Ok(true),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.optional { "Optional" } else { "Requires" };
        match &self.min_version {
            Some(min) => write!(f, "{} mod: {} (>= {})", kind, self.mod_id, min),
            None => write!(f, "{} mod: {} (any version)", kind, self.mod_id),
        }
    }
}
