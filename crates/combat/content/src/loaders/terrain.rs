//! Terrain table loader.

use std::collections::BTreeMap;
use std::path::Path;

use combat_core::Terrain;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Terrain table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainCatalog {
    pub terrain: Vec<Terrain>,
}

/// Loader for terrain rows from RON files.
pub struct TerrainLoader;

impl TerrainLoader {
    /// Load terrain rows keyed by name.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<String, Terrain>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<String, Terrain>> {
        let catalog: TerrainCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse terrain RON: {}", e))?;

        let mut terrain = BTreeMap::new();
        for row in catalog.terrain {
            let name = row.name.clone();
            if terrain.insert(name.clone(), row).is_some() {
                anyhow::bail!("Duplicate terrain '{}'", name);
            }
        }
        Ok(terrain)
    }
}
