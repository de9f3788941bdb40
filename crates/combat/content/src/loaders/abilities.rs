//! Ability table loader.

use std::path::Path;

use combat_core::{AbilityDef, AbilityTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Ability table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<AbilityDef>,
}

/// Loader for the ability table from RON files.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load the ability table from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing AbilityCatalog
    ///
    /// # Returns
    ///
    /// Returns an AbilityTable; duplicate ids and empty names are rejected.
    pub fn load(path: &Path) -> LoadResult<AbilityTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityTable> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability table RON: {}", e))?;

        AbilityTable::new(catalog.abilities)
            .map_err(|e| anyhow::anyhow!("Invalid ability table: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::env::{ActivationFormula, Condition, StrikeEffect, Trigger};

    #[test]
    fn parses_triggers_and_effects() {
        let text = r#"(
            abilities: [
                (
                    id: "luna",
                    name: "Luna",
                    trigger: OnAttack,
                    activation: Some(Skl),
                    strike: Some(DamageMultiplier(percent: 150)),
                ),
                (
                    id: "wrath",
                    name: "Wrath",
                    trigger: OnCombatStart,
                    condition: Some(Below50),
                    effects: (crit_bonus: 20),
                ),
            ],
        )"#;
        let table = AbilityLoader::parse(text).expect("valid table");
        let luna = table.get("luna").expect("luna");
        assert_eq!(luna.trigger, Trigger::OnAttack);
        assert_eq!(luna.activation, Some(ActivationFormula::Skl));
        assert_eq!(luna.strike, Some(StrikeEffect::DamageMultiplier { percent: 150 }));

        let wrath = table.get("wrath").expect("wrath");
        assert_eq!(wrath.condition, Some(Condition::Below50));
        assert_eq!(wrath.effects.crit_bonus, 20);
    }

    #[test]
    fn duplicate_ids_fail() {
        let text = r#"(abilities: [
            (id: "luna", name: "Luna", trigger: OnAttack),
            (id: "luna", name: "Luna II", trigger: OnAttack),
        ])"#;
        let err = AbilityLoader::parse(text).expect_err("duplicate id");
        assert!(err.to_string().contains("luna"));
    }
}
