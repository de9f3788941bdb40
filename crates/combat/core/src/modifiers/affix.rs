//! Affix pass: the enemy-only counterpart of ability aggregation.

use crate::env::{AbilityTable, AffixEffects, AffixTable, AffixTrigger, Terrain};
use crate::modifiers::{Activation, CombatScene, ModifierSet};
use crate::state::Faction;

/// Affix bonuses for one combatant.
///
/// Only `modifiers` feeds combat; the rest is for the movement layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AffixModifiers {
    pub modifiers: ModifierSet,
    pub mov_bonus: i32,
    pub immune_to_displacement: bool,
}

impl CombatScene<'_> {
    /// Folds the unit's affixes, plus ally affix auras, into modifiers.
    ///
    /// Units outside the enemy faction never carry affixes and get an empty
    /// result.
    pub fn affixes(&self, table: &AffixTable) -> AffixModifiers {
        let unit = self.unit;
        let mut out = AffixModifiers::default();
        if unit.faction != Faction::Enemy {
            return out;
        }

        for def in table.resolve(&unit.affixes) {
            let applies = match def.trigger {
                AffixTrigger::Passive => true,
                AffixTrigger::OnCombatStart => def
                    .condition
                    .as_ref()
                    .is_none_or(|c| self.condition_holds(c)),
                _ => false,
            };
            if !applies {
                continue;
            }
            let mut set = affix_modifiers(&def.effects, self.terrain);
            set.activated.push(Activation::affix(&def.id, &def.name));
            out.modifiers = out.modifiers.merge(set);
            out.mov_bonus += def.effects.mov_bonus;
            out.immune_to_displacement |= def.effects.immune_to_displacement;
        }

        // ally auras grant attack only and are not announced
        for ally in self.other_allies() {
            let distance = ally.position.distance(&unit.position);
            for def in table.resolve(&ally.affixes) {
                if def.trigger == AffixTrigger::PassiveAura && distance <= def.range {
                    out.modifiers.atk_bonus += def.effects.atk_bonus;
                }
            }
        }

        out
    }

    /// Skill and affix modifiers merged into one set.
    pub fn modifiers(&self, abilities: &AbilityTable, affixes: &AffixTable) -> ModifierSet {
        self.abilities(abilities).merge(self.affixes(affixes).modifiers)
    }
}

/// Combat-relevant part of an affix; terrain DEF folds into `def_bonus`.
fn affix_modifiers(effects: &AffixEffects, terrain: Option<&Terrain>) -> ModifierSet {
    let terrain_def = Terrain::name_of(terrain)
        .and_then(|name| effects.terrain_def_bonus.get(name))
        .copied()
        .unwrap_or(0);
    ModifierSet {
        atk_bonus: effects.atk_bonus,
        def_bonus: effects.def_bonus + terrain_def,
        res_bonus: effects.res_bonus,
        hit_bonus: effects.hit_bonus,
        avoid_bonus: effects.avoid_bonus,
        ..ModifierSet::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::AffixDef;
    use crate::state::{CombatUnit, Position, UnitId, UnitStats};

    fn table() -> AffixTable {
        AffixTable::new([
            AffixDef::new("brittle", "Brittle", AffixTrigger::Passive).with_effects(AffixEffects {
                def_bonus: -3,
                ..AffixEffects::default()
            }),
            AffixDef::new("entrenched", "Entrenched", AffixTrigger::Passive).with_effects(
                AffixEffects {
                    terrain_def_bonus: [("Fort".to_string(), 3)].into_iter().collect(),
                    immune_to_displacement: true,
                    mov_bonus: -1,
                    ..AffixEffects::default()
                },
            ),
            AffixDef::new("warlord", "Warlord", AffixTrigger::PassiveAura)
                .with_range(2)
                .with_effects(AffixEffects {
                    atk_bonus: 2,
                    ..AffixEffects::default()
                }),
        ])
        .expect("valid table")
    }

    fn brigand(id: u32, x: i32) -> CombatUnit {
        CombatUnit::new(UnitId(id), "Brigand", UnitStats::default())
            .with_faction(Faction::Enemy)
            .at(Position::new(x, 0))
    }

    #[test]
    fn passive_affixes_and_terrain() {
        let me = brigand(1, 0).with_affixes(["brittle", "entrenched"]);
        let foe = CombatUnit::new(UnitId(9), "Lyn", UnitStats::default());
        let fort = Terrain::new("Fort", 20, 2);
        let out = CombatScene::new(&me, &foe, false)
            .with_terrain(Some(&fort))
            .affixes(&table());
        // -3 brittle + 3 fort
        assert_eq!(out.modifiers.def_bonus, 0);
        assert_eq!(out.mov_bonus, -1);
        assert!(out.immune_to_displacement);
        assert_eq!(out.modifiers.activated.len(), 2);
    }

    #[test]
    fn players_ignore_affixes() {
        let me = brigand(1, 0)
            .with_affixes(["brittle"])
            .with_faction(Faction::Player);
        let foe = brigand(2, 1);
        let out = CombatScene::new(&me, &foe, true).affixes(&table());
        assert_eq!(out, AffixModifiers::default());
    }

    #[test]
    fn aura_from_nearby_ally() {
        let me = brigand(1, 0);
        let boss = brigand(2, 2).with_affixes(["warlord"]);
        let foe = CombatUnit::new(UnitId(9), "Lyn", UnitStats::default());
        let allies = [boss];
        let scene = CombatScene::new(&me, &foe, true).with_allies(&allies);
        let merged = scene.modifiers(&AbilityTable::default(), &table());
        assert_eq!(merged.atk_bonus, 2);
        assert!(merged.activated.is_empty());
    }
}
