//! Content loaders for reading combat data from files.
//!
//! One loader per file. Every loader returns core types directly; raw rows
//! that need post-processing (weapon specials, unit presets) are converted
//! here so nothing downstream ever sees free text.

pub mod abilities;
pub mod affixes;
pub mod arts;
pub mod config;
pub mod factory;
pub mod terrain;
pub mod units;
pub mod weapons;

pub use abilities::AbilityLoader;
pub use affixes::AffixLoader;
pub use arts::ArtLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use terrain::TerrainLoader;
pub use units::{UnitLoader, UnitPreset};
pub use weapons::{WeaponLoader, WeaponRecord};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
