//! Weapon art loader.

use std::path::Path;

use combat_core::WeaponArt;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Weapon art catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtCatalog {
    pub arts: Vec<WeaponArt>,
}

/// Loader for weapon arts from RON files.
pub struct ArtLoader;

impl ArtLoader {
    /// Load weapon arts in file order. Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<WeaponArt>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WeaponArt>> {
        let catalog: ArtCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon art RON: {}", e))?;

        for (i, art) in catalog.arts.iter().enumerate() {
            if catalog.arts[..i].iter().any(|a| a.id == art.id) {
                anyhow::bail!("Duplicate weapon art id '{}'", art.id);
            }
        }
        Ok(catalog.arts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{WeaponCategory, WeaponRank};

    #[test]
    fn parses_costs_and_limits() {
        let text = r#"(arts: [
            (
                id: "grounder",
                name: "Grounder",
                category: Sword,
                required_rank: Mast,
                hp_cost: 3,
                per_turn_limit: 1,
                effects: (atk_bonus: 5, hit_bonus: 20),
            ),
        ])"#;
        let arts = ArtLoader::parse(text).expect("valid arts");
        assert_eq!(arts[0].category, WeaponCategory::Sword);
        assert_eq!(arts[0].required_rank, WeaponRank::Mast);
        assert_eq!(arts[0].effects.atk_bonus, 5);
        assert_eq!(arts[0].per_map_limit, 0);
    }
}
