//! Loaded content, cross-referenced.

use std::collections::BTreeMap;

use combat_core::{
    AbilityTable, AffixTable, CombatConfig, CombatUnit, Position, Terrain, UnitId, Weapon,
    WeaponArt,
};

use crate::loaders::{LoadResult, UnitPreset};

/// Everything one data directory describes.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub config: CombatConfig,
    pub weapons: Vec<Weapon>,
    pub abilities: AbilityTable,
    pub affixes: AffixTable,
    pub arts: Vec<WeaponArt>,
    pub terrain: BTreeMap<String, Terrain>,
    pub units: Vec<UnitPreset>,
}

impl Catalog {
    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|w| w.name == name)
    }

    pub fn art(&self, id: &str) -> Option<&WeaponArt> {
        self.arts.iter().find(|a| a.id == id)
    }

    pub fn terrain(&self, name: &str) -> Option<&Terrain> {
        self.terrain.get(name)
    }

    pub fn preset(&self, name: &str) -> Option<&UnitPreset> {
        self.units.iter().find(|p| p.name == name)
    }

    /// Instantiates the named preset.
    pub fn unit(&self, name: &str, id: UnitId, position: Position) -> LoadResult<CombatUnit> {
        let preset = self
            .preset(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown unit preset '{}'", name))?;
        preset.build(id, position, &self.weapons)
    }

    /// Fails on the first dangling reference between files.
    ///
    /// Unknown ability and affix ids are legal at combat time (they are
    /// skipped), but in shipped data they are always typos.
    pub fn validate(&self) -> LoadResult<()> {
        for weapon in &self.weapons {
            for id in &weapon.granted_abilities {
                if self.abilities.get(id).is_none() {
                    anyhow::bail!("Weapon '{}' grants unknown ability '{}'", weapon.name, id);
                }
            }
        }
        for preset in &self.units {
            if let Some(name) = &preset.weapon {
                if self.weapon(name).is_none() {
                    anyhow::bail!("Unit '{}' references unknown weapon '{}'", preset.name, name);
                }
            }
            for id in &preset.skills {
                if self.abilities.get(id).is_none() {
                    anyhow::bail!("Unit '{}' has unknown skill '{}'", preset.name, id);
                }
            }
            for id in &preset.affixes {
                if self.affixes.get(id).is_none() {
                    anyhow::bail!("Unit '{}' has unknown affix '{}'", preset.name, id);
                }
            }
        }
        Ok(())
    }
}
