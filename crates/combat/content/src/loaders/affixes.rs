//! Affix table loader.

use std::path::Path;

use combat_core::{AffixDef, AffixTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Affix table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffixCatalog {
    pub affixes: Vec<AffixDef>,
}

/// Loader for the affix table from RON files.
pub struct AffixLoader;

impl AffixLoader {
    /// Load the affix table from a RON file.
    pub fn load(path: &Path) -> LoadResult<AffixTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AffixTable> {
        let catalog: AffixCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse affix table RON: {}", e))?;

        AffixTable::new(catalog.affixes).map_err(|e| anyhow::anyhow!("Invalid affix table: {}", e))
    }
}
