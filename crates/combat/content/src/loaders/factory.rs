//! Content factory for building a combat catalog from data files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use combat_core::{AbilityTable, AffixTable, CombatConfig, Terrain, Weapon, WeaponArt};

use crate::catalog::Catalog;
use crate::loaders::{
    AbilityLoader, AffixLoader, ArtLoader, ConfigLoader, LoadResult, TerrainLoader, UnitLoader,
    UnitPreset, WeaponLoader,
};

/// Content factory that loads all combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── weapons.ron
/// ├── abilities.ron
/// ├── affixes.ron
/// ├── arts.ron
/// ├── terrain.ron
/// └── units.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data set shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(crate::DEFAULT_DATA_DIR)
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load weapon catalog from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<Vec<Weapon>> {
        WeaponLoader::load(&self.data_dir.join("weapons.ron"))
    }

    /// Load ability table from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityTable> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    /// Load affix table from `affixes.ron`.
    pub fn load_affixes(&self) -> LoadResult<AffixTable> {
        AffixLoader::load(&self.data_dir.join("affixes.ron"))
    }

    /// Load weapon arts from `arts.ron`.
    pub fn load_arts(&self) -> LoadResult<Vec<WeaponArt>> {
        ArtLoader::load(&self.data_dir.join("arts.ron"))
    }

    /// Load terrain rows from `terrain.ron`.
    pub fn load_terrain(&self) -> LoadResult<BTreeMap<String, Terrain>> {
        TerrainLoader::load(&self.data_dir.join("terrain.ron"))
    }

    /// Load unit presets from `units.ron`.
    pub fn load_units(&self) -> LoadResult<Vec<UnitPreset>> {
        UnitLoader::load(&self.data_dir.join("units.ron"))
    }

    /// Load every file and cross-check references between them.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let catalog = Catalog {
            config: self.load_config()?,
            weapons: self.load_weapons()?,
            abilities: self.load_abilities()?,
            affixes: self.load_affixes()?,
            arts: self.load_arts()?,
            terrain: self.load_terrain()?,
            units: self.load_units()?,
        };
        catalog.validate()?;

        tracing::info!(
            data_dir = %self.data_dir.display(),
            weapons = catalog.weapons.len(),
            abilities = catalog.abilities.len(),
            affixes = catalog.affixes.len(),
            units = catalog.units.len(),
            "loaded combat catalog"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ContentFactory::new(dir.path())
            .load_config()
            .expect_err("no config.toml");
        assert!(err.to_string().contains("config.toml"));
    }
}
