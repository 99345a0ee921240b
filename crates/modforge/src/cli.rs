use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use modforge_core::constants::{APP_NAME, DEFAULT_CONFIG_FILE, DEFAULT_MODS_DIR};
use modforge_core::{ManagerConfig, ModError, ModManager};

/// Modforge: resolve, order and load game mods
#[derive(Parser, Debug)]
#[command(name = APP_NAME, author, version, about, long_about = None)]
pub struct CliArgs {
    /// Configuration file (JSON, YAML or TOML). Defaults to ./modforge.toml when present
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory whose subdirectories are mods. Repeatable, searched in order
    #[arg(long = "search-path", short = 's', value_name = "DIR")]
    pub search_paths: Vec<PathBuf>,

    /// Manifest file looked up in every mod directory
    #[arg(long, value_name = "NAME")]
    pub manifest_name: Option<String>,

    /// Disable a mod before running the command. Repeatable
    #[arg(long = "disable", value_name = "ID", global = true)]
    pub disable: Vec<String>,

    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List discovered mods
    List,
    /// Print the computed load order, one id per line
    Order,
    /// Report unmet dependencies without loading anything
    Check,
    /// Load every enabled mod, report the outcome, then unload
    Load,
}

impl CliArgs {
    /// Merge the config file (if any) with the command-line overrides
    fn resolve_config(&self) -> Result<ManagerConfig, ModError> {
        let mut config = match &self.config {
            Some(path) => ManagerConfig::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                debug!("Using {}", DEFAULT_CONFIG_FILE);
                ManagerConfig::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => ManagerConfig::default(),
        };

        if let Some(name) = &self.manifest_name {
            config.manifest_filename = name.clone();
        }
        config.search_paths.extend(self.search_paths.iter().cloned());
        if config.search_paths.is_empty() {
            config.search_paths.push(PathBuf::from(DEFAULT_MODS_DIR));
        }
        config.disabled.extend(self.disable.iter().cloned());
        Ok(config)
    }
}

/// Build the manager, discover mods and run the selected command
pub fn run(args: &CliArgs) -> Result<ExitCode, ModError> {
    let config = args.resolve_config()?;
    let mut manager = ModManager::from_config(&config);
    manager.discover()?;

    for id in &args.disable {
        if !manager.has_mod(id) {
            warn!("Cannot disable unknown mod '{}'", id);
        }
    }

    match args.command {
        Command::List => list(&manager),
        Command::Order => order(&mut manager),
        Command::Check => check(&mut manager),
        Command::Load => load(&mut manager),
    }
}

fn list(manager: &ModManager) -> Result<ExitCode, ModError> {
    if manager.mod_count() == 0 {
        println!("No mods found.");
        return Ok(ExitCode::SUCCESS);
    }

    for m in manager.get_mods() {
        let manifest = m.manifest();
        let status = if m.is_enabled() { "enabled" } else { "disabled" };
        println!(
            "{} {} [{}] {} ({})",
            m.id(),
            manifest.version(),
            manifest.priority(),
            status,
            m.base_path().display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn order(manager: &mut ModManager) -> Result<ExitCode, ModError> {
    for id in manager.get_load_order()? {
        println!("{}", id);
    }
    Ok(ExitCode::SUCCESS)
}

fn check(manager: &mut ModManager) -> Result<ExitCode, ModError> {
    let mut issues: Vec<ModError> = Vec::new();
    if let Err(e) = manager.get_load_order() {
        issues.push(e);
    }
    issues.extend(manager.check_dependencies());

    if issues.is_empty() {
        println!("All dependencies satisfied ({} mods).", manager.mod_count());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} issue(s):", issues.len());
    for issue in &issues {
        println!("  - {}", issue);
    }
    Ok(ExitCode::FAILURE)
}

fn load(manager: &mut ModManager) -> Result<ExitCode, ModError> {
    let report = manager.load_all()?;

    for id in &report.loaded {
        println!("loaded   {}", id);
    }
    for id in &report.skipped {
        println!("skipped  {}", id);
    }
    for (id, err) in &report.errors {
        println!("failed   {}: {}", id, err);
    }

    let unloaded = manager.unload_all();
    info!("Unloaded {} mod(s)", unloaded.len());

    if report.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
