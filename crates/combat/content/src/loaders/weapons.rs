//! Weapon catalog loader.
//!
//! Weapon rows keep the free-text `special` column authors write; it is parsed
//! into a typed capability set exactly once, here.

use std::path::Path;

use combat_core::env::StaffProfile;
use combat_core::{Weapon, WeaponCategory, WeaponRange};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn melee() -> String {
    "1".to_string()
}

/// One weapon row as authored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub category: WeaponCategory,
    pub might: i32,
    pub hit: i32,
    #[serde(default)]
    pub crit: i32,
    #[serde(default)]
    pub weight: i32,
    /// `"1"`, `"1-2"`, `"1-ALL"`.
    #[serde(default = "melee")]
    pub range: String,
    #[serde(default)]
    pub special: String,
    #[serde(default)]
    pub staff: Option<StaffProfile>,
    /// Ability ids granted while equipped.
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl WeaponRecord {
    /// Builds the runtime weapon.
    ///
    /// An unparsable range falls back to melee and is logged.
    pub fn into_weapon(self) -> Weapon {
        let range = WeaponRange::try_parse(&self.range).unwrap_or_else(|e| {
            tracing::warn!(weapon = %self.name, range = %self.range, "{e}; using melee range");
            WeaponRange::MELEE
        });

        let mut weapon = Weapon::new(
            self.name,
            self.category,
            self.might,
            self.hit,
            self.crit,
            self.weight,
        )
        .with_range(range)
        .with_special(&self.special)
        .with_granted_abilities(self.abilities);
        if let Some(staff) = self.staff {
            weapon = weapon.with_staff(staff);
        }
        weapon
    }
}

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponRecord>,
}

/// Loader for weapon catalog from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load weapon catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing WeaponCatalog
    ///
    /// # Returns
    ///
    /// Returns the parsed weapons in file order. Duplicate names are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<Weapon>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Weapon>> {
        let catalog: WeaponCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut weapons: Vec<Weapon> = Vec::with_capacity(catalog.weapons.len());
        for record in catalog.weapons {
            if weapons.iter().any(|w| w.name == record.name) {
                anyhow::bail!("Duplicate weapon name '{}'", record.name);
            }
            let weapon = record.into_weapon();
            tracing::debug!(weapon = %weapon.name, capabilities = ?weapon.capabilities, "loaded weapon");
            weapons.push(weapon);
        }

        Ok(weapons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::Stat;

    const SAMPLE: &str = r#"(
        weapons: [
            (name: "Iron Sword", category: Sword, might: 5, hit: 90, weight: 5),
            (
                name: "Hand Axe",
                category: Axe,
                might: 7,
                hit: 60,
                weight: 9,
                range: "1-2",
            ),
            (
                name: "Armorslayer",
                category: Sword,
                might: 8,
                hit: 80,
                weight: 11,
                special: "Effective vs Armored (3x). +2 DEF when equipped",
            ),
            (name: "Broken", category: Lance, might: 1, hit: 50, range: "far"),
        ],
    )"#;

    #[test]
    fn parses_specials_once() {
        let weapons = WeaponLoader::parse(SAMPLE).expect("valid catalog");
        assert_eq!(weapons.len(), 4);
        assert_eq!(weapons[1].range, WeaponRange::new(1, 2));
        assert_eq!(weapons[2].capabilities.stat_bonus(Stat::Def), 2);
        assert_eq!(weapons[3].range, WeaponRange::MELEE);
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = r#"(weapons: [
            (name: "Iron Sword", category: Sword, might: 5, hit: 90),
            (name: "Iron Sword", category: Sword, might: 6, hit: 85),
        ])"#;
        assert!(WeaponLoader::parse(text).is_err());
    }
}
