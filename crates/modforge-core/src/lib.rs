pub mod config;
pub mod constants;
pub mod mod_system;
pub mod utils;

// Re-export key public types for the binary and for embedding applications
pub use config::{ConfigFormat, ManagerConfig};
pub use mod_system::error::{ModError, Result};
pub use mod_system::{
    CapabilityKind, Dependency, LoadReport, Manifest, Mod, ModActivator, ModLoader, ModManager,
    ModPriority, ModProvider, ModState, ModType,
};

#[cfg(test)]
mod tests;
