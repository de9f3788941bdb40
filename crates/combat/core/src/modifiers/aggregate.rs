//! Modifier aggregation for one combatant.
//!
//! # Order
//!
//! 1. Passive abilities: the unit's own skills, then abilities granted by its
//!    weapon, deduplicated by id
//! 2. On-combat-start abilities whose [`Condition`] holds
//! 3. Aura abilities of living allies within the aura's range
//! 4. Accessory combat effects, gated by the accessory's own condition
//!
//! Aggregation is pure: it reads the scene and the table and never rolls.

use crate::env::{AbilityEffects, AbilityTable, Accessory, Condition, Terrain, Trigger, Weapon};
use crate::modifiers::{Activation, ActivationSource, CombatFlags, ModifierSet};
use crate::state::CombatUnit;

/// Everything around one combatant that conditions and auras can observe.
#[derive(Clone, Copy, Debug)]
pub struct CombatScene<'a> {
    pub unit: &'a CombatUnit,
    pub opponent: &'a CombatUnit,
    /// May include `unit` itself; it is skipped by id.
    pub allies: &'a [CombatUnit],
    pub enemies: &'a [CombatUnit],
    /// Tile under `unit`.
    pub terrain: Option<&'a Terrain>,
    pub is_initiating: bool,
}

impl<'a> CombatScene<'a> {
    /// A bare duel: no allies, no other enemies, no terrain.
    pub fn new(unit: &'a CombatUnit, opponent: &'a CombatUnit, is_initiating: bool) -> Self {
        Self {
            unit,
            opponent,
            allies: &[],
            enemies: &[],
            terrain: None,
            is_initiating,
        }
    }

    #[must_use]
    pub fn with_allies(mut self, allies: &'a [CombatUnit]) -> Self {
        self.allies = allies;
        self
    }

    #[must_use]
    pub fn with_enemies(mut self, enemies: &'a [CombatUnit]) -> Self {
        self.enemies = enemies;
        self
    }

    #[must_use]
    pub fn with_terrain(mut self, terrain: Option<&'a Terrain>) -> Self {
        self.terrain = terrain;
        self
    }

    /// Living allies other than the unit itself.
    pub fn other_allies(&self) -> impl Iterator<Item = &'a CombatUnit> + '_ {
        let id = self.unit.id;
        self.allies
            .iter()
            .filter(move |a| a.id != id && a.current_hp > 0)
    }

    pub fn condition_holds(&self, condition: &Condition) -> bool {
        let unit = self.unit;
        match condition {
            Condition::Below50 => unit.is_below_half(),
            Condition::Above75 => unit.is_above_three_quarters(),
            Condition::AdjacentAlly => self
                .other_allies()
                .any(|a| a.position.distance(&unit.position) == 1),
            Condition::AdjacentEnemy => {
                let opponent_adjacent = self.opponent.current_hp > 0
                    && self.opponent.position.distance(&unit.position) == 1;
                opponent_adjacent
                    || self
                        .enemies
                        .iter()
                        .filter(|e| e.current_hp > 0)
                        .any(|e| e.position.distance(&unit.position) == 1)
            }
            Condition::Initiating => self.is_initiating,
            Condition::DefendingAbove50 => !self.is_initiating && unit.is_above_half(),
            Condition::OnTerrain(name) => Terrain::name_of(self.terrain) == Some(name.as_str()),
        }
    }

    fn condition_met(&self, condition: Option<&Condition>) -> bool {
        condition.is_none_or(|c| self.condition_holds(c))
    }

    /// Folds the ability table into one [`ModifierSet`].
    pub fn abilities(&self, table: &AbilityTable) -> ModifierSet {
        let unit = self.unit;
        let weapon = unit.weapon.as_ref();
        let mut mods = ModifierSet::new();

        let granted = weapon.map(|w| w.granted_abilities.as_slice()).unwrap_or(&[]);
        for def in table.resolve(unit.skills.iter().chain(granted)) {
            match def.trigger {
                Trigger::Passive => {
                    mods = mods.merge(effects_modifiers(&def.effects, weapon));
                }
                Trigger::OnCombatStart if self.condition_met(def.condition.as_ref()) => {
                    let mut set = effects_modifiers(&def.effects, weapon);
                    set.activated.push(Activation::ability(&def.id, &def.name));
                    mods = mods.merge(set);
                }
                _ => {}
            }
        }

        for ally in self.other_allies() {
            let distance = ally.position.distance(&unit.position);
            for def in table.resolve(&ally.skills) {
                if def.trigger == Trigger::PassiveAura && distance <= def.range {
                    mods = mods.merge(effects_modifiers(&def.effects, weapon));
                }
            }
        }

        if let Some(accessory) = unit.accessory.as_ref() {
            mods = mods.merge(self.accessory(accessory));
        }

        mods
    }

    fn accessory(&self, accessory: &Accessory) -> ModifierSet {
        let fx = &accessory.combat;
        if !self.condition_met(fx.condition.as_ref()) {
            return ModifierSet::new();
        }
        let mut mods = ModifierSet {
            hit_bonus: fx.hit_bonus,
            avoid_bonus: fx.avoid_bonus,
            crit_bonus: fx.crit_bonus,
            atk_bonus: fx.atk_bonus,
            def_bonus: fx.def_bonus,
            res_bonus: fx.res_bonus,
            spd_bonus: fx.spd_bonus,
            ..ModifierSet::default()
        };
        if fx.condition.is_some() {
            mods.activated.push(Activation::new(
                ActivationSource::Accessory,
                &accessory.name,
                &accessory.name,
            ));
        }
        mods
    }
}

/// Collects every skill-sourced bonus for `unit` entering combat.
///
/// # Arguments
///
/// * `allies` - Units on the same side; `unit` itself may be included
/// * `enemies` - Units on the opposing side besides `opponent`
/// * `terrain` - Tile under `unit`, if known
///
/// # Returns
///
/// A fresh [`ModifierSet`]; unknown ability ids are skipped.
pub fn aggregate(
    unit: &CombatUnit,
    opponent: &CombatUnit,
    allies: &[CombatUnit],
    enemies: &[CombatUnit],
    terrain: Option<&Terrain>,
    table: &AbilityTable,
    is_initiating: bool,
) -> ModifierSet {
    CombatScene::new(unit, opponent, is_initiating)
        .with_allies(allies)
        .with_enemies(enemies)
        .with_terrain(terrain)
        .abilities(table)
}

/// Converts ability effects into modifiers for a unit holding `weapon`.
///
/// `magic_range_bonus` counts only while a tome or light weapon is equipped.
pub fn effects_modifiers(effects: &AbilityEffects, weapon: Option<&Weapon>) -> ModifierSet {
    let casting = weapon.is_some_and(|w| w.category.is_magical());
    let mut flags = CombatFlags::empty();
    flags.set(CombatFlags::PREVENT_COUNTER, effects.prevent_counter);
    flags.set(CombatFlags::TARGETS_RES, effects.targets_res);
    flags.set(CombatFlags::HALVE_PHYSICAL, effects.halve_physical);
    flags.set(CombatFlags::VENGEANCE, effects.vengeance);
    flags.set(CombatFlags::IGNORE_TERRAIN_AVOID, effects.ignore_terrain_avoid);
    flags.set(CombatFlags::VANTAGE, effects.vantage);
    flags.set(CombatFlags::QUICK_RIPOSTE, effects.quick_riposte);
    flags.set(CombatFlags::DESPERATION, effects.desperation);

    ModifierSet {
        hit_bonus: effects.hit_bonus,
        avoid_bonus: effects.avoid_bonus,
        crit_bonus: effects.crit_bonus,
        atk_bonus: effects.atk_bonus,
        def_bonus: effects.def_bonus,
        res_bonus: effects.res_bonus,
        spd_bonus: effects.spd_bonus,
        range_bonus: effects.range_bonus + if casting { effects.magic_range_bonus } else { 0 },
        flags,
        stat_scaling: effects.stat_scaling,
        effectiveness: effects.effectiveness.clone(),
        range_override: effects.range_override,
        activated: Vec::new(),
    }
}
