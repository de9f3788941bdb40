//! Data-driven combat content and loaders.
//!
//! This crate reads the RON/TOML files that describe a combat ruleset:
//! - Weapon catalog, with free-text specials parsed once at load
//! - Ability and affix tables
//! - Weapon arts and terrain rows
//! - Unit presets for simulation
//! - Combat configuration (TOML)
//!
//! Everything loads into `combat-core` types; nothing here takes part in a
//! combat call.

pub mod catalog;
pub mod loaders;

pub use catalog::Catalog;
pub use loaders::{
    AbilityLoader, AffixLoader, ArtLoader, ConfigLoader, ContentFactory, LoadResult,
    TerrainLoader, UnitLoader, UnitPreset, WeaponLoader, WeaponRecord,
};

/// Data set shipped with this crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");
