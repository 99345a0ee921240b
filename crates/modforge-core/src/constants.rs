/// Application name
pub const APP_NAME: &str = "modforge";

/// Default manifest file looked up inside every mod directory
pub const DEFAULT_MANIFEST_FILENAME: &str = "mod.json";

/// Manifest file used by the TOML manifest parser
pub const TOML_MANIFEST_FILENAME: &str = "mod.toml";

/// Default mods directory
pub const DEFAULT_MODS_DIR: &str = "mods";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "modforge.toml";
