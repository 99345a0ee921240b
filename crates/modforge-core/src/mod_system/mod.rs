//! # Modforge Mod System
//!
//! This module turns a set of mod directories on disk into a deterministic,
//! constraint-satisfying activation order and drives every mod through its
//! load/unload lifecycle along that order.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`manifest`]**: The declarative record of a mod ([`Manifest`]): identity,
//!   version, priority, dependencies and `load_after`/`load_before` hints.
//! - **[`dependency`]**: A single dependency entry ([`Dependency`]) and its
//!   minimum-version check.
//! - **[`version`]**: Lenient version parsing on top of `semver`.
//! - **[`parser`]**: The [`ManifestParser`](parser::ManifestParser) collaborator
//!   and its JSON/TOML implementations.
//! - **[`instance`]**: The [`Mod`] lifecycle wrapper and its [`ModState`] machine.
//! - **[`activator`]**: The load-execution collaborator ([`ModActivator`]) invoked
//!   by [`Mod::load`].
//! - **[`capability`]**: Provider objects a mod contributes, keyed by
//!   [`CapabilityKind`].
//! - **[`loader`]**: Filesystem discovery ([`ModLoader`]).
//! - **[`graph`]**: The ordering graph and its priority-aware topological sort.
//! - **[`manager`]**: The registry and orchestrator ([`ModManager`]).
//! - **[`error`]**: [`ModError`](error::ModError) and friends.
pub mod activator;
pub mod capability;
pub mod dependency;
pub mod error;
pub mod graph;
pub mod instance;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod parser;
pub mod version;

pub use activator::{DataPathActivator, ModActivator, NoopActivator};
pub use capability::{CapabilityKind, ModProvider};
pub use dependency::Dependency;
pub use instance::{Mod, ModState};
pub use loader::ModLoader;
pub use manager::{LoadReport, ModManager};
pub use manifest::{Manifest, ManifestBuilder, ModPriority, ModType};
pub use parser::{JsonManifestParser, ManifestParser};
#[cfg(feature = "toml-config")]
pub use parser::TomlManifestParser;
