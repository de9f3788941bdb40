//! Unit roster loader.
//!
//! Presets reference their weapon by name; the weapon is resolved against the
//! weapon catalog when a preset is turned into a [`CombatUnit`].

use std::path::Path;

use combat_core::{
    Accessory, CombatUnit, Faction, MoveType, Position, UnitId, UnitStats, Weapon, WeaponRank,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn full_hp() -> i32 {
    100
}

/// One roster entry as authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPreset {
    pub name: String,
    pub stats: UnitStats,
    /// Weapon name in `weapons.ron`; `None` means unarmed.
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub affixes: Vec<String>,
    #[serde(default)]
    pub accessory: Option<Accessory>,
    #[serde(default)]
    pub faction: Faction,
    #[serde(default)]
    pub move_type: MoveType,
    #[serde(default)]
    pub weapon_rank: WeaponRank,
    /// Starting HP as a percent of max, floored, at least 1.
    #[serde(default = "full_hp")]
    pub hp_percent: i32,
}

impl UnitPreset {
    /// Builds a fresh combatant from this preset.
    ///
    /// # Arguments
    ///
    /// * `id` - Id the caller assigns to this instance
    /// * `position` - Tile the unit starts on
    /// * `weapons` - Weapon catalog used to resolve the weapon name
    pub fn build(&self, id: UnitId, position: Position, weapons: &[Weapon]) -> LoadResult<CombatUnit> {
        let current_hp = (self.stats.hp * self.hp_percent.clamp(0, 100) / 100).max(1);
        let mut unit = CombatUnit::new(id, self.name.clone(), self.stats)
            .with_hp(current_hp)
            .with_skills(self.skills.iter().cloned())
            .with_affixes(self.affixes.iter().cloned())
            .with_faction(self.faction)
            .with_move_type(self.move_type)
            .with_rank(self.weapon_rank)
            .at(position);

        if let Some(name) = &self.weapon {
            let weapon = weapons
                .iter()
                .find(|w| &w.name == name)
                .ok_or_else(|| {
                    anyhow::anyhow!("Unit '{}' references unknown weapon '{}'", self.name, name)
                })?;
            unit = unit.with_weapon(weapon.clone());
        }
        if let Some(accessory) = &self.accessory {
            unit = unit.with_accessory(accessory.clone());
        }

        Ok(unit)
    }
}

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitRoster {
    pub units: Vec<UnitPreset>,
}

/// Loader for unit presets from RON files.
pub struct UnitLoader;

impl UnitLoader {
    /// Load unit presets in file order. Duplicate names are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<UnitPreset>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<UnitPreset>> {
        let roster: UnitRoster = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit roster RON: {}", e))?;

        for (i, preset) in roster.units.iter().enumerate() {
            if roster.units[..i].iter().any(|p| p.name == preset.name) {
                anyhow::bail!("Duplicate unit preset '{}'", preset.name);
            }
            if preset.stats.hp <= 0 {
                anyhow::bail!("Unit preset '{}' has non-positive max HP", preset.name);
            }
        }
        Ok(roster.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::WeaponCategory;

    const ROSTER: &str = r#"(units: [
        (
            name: "Myrmidon",
            stats: (hp: 20, strength: 6, skill: 11, speed: 12, luck: 5, defense: 4, resistance: 1),
            weapon: Some("Iron Sword"),
            skills: ["wrath"],
            hp_percent: 50,
        ),
        (name: "Villager", stats: (hp: 10)),
    ])"#;

    #[test]
    fn builds_units_from_presets() {
        let presets = UnitLoader::parse(ROSTER).expect("valid roster");
        let weapons = [Weapon::new("Iron Sword", WeaponCategory::Sword, 5, 90, 0, 5)];

        let myrmidon = presets[0]
            .build(UnitId(7), Position::default(), &weapons)
            .expect("weapon exists");
        assert_eq!(myrmidon.current_hp, 10);
        assert_eq!(myrmidon.skills, vec!["wrath".to_string()]);
        assert_eq!(myrmidon.weapon.as_ref().map(|w| w.name.as_str()), Some("Iron Sword"));

        let villager = presets[1]
            .build(UnitId(8), Position::default(), &weapons)
            .expect("unarmed");
        assert!(villager.weapon.is_none());
        assert_eq!(villager.current_hp, 10);
    }

    #[test]
    fn unknown_weapon_is_an_error() {
        let presets = UnitLoader::parse(ROSTER).expect("valid roster");
        let err = presets[0]
            .build(UnitId(1), Position::default(), &[])
            .expect_err("no weapons");
        assert!(err.to_string().contains("Iron Sword"));
    }
}
