//! # Modforge Configuration
//!
//! Manager settings read from a JSON, YAML or TOML file: which manifest file
//! name to look for, where to search for mods and which mods start disabled.
pub mod settings;

pub use settings::{ConfigFormat, ManagerConfig};
