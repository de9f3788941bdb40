//! Ability (skill) table.
//!
//! Abilities are pure data: a trigger category, an optional gating condition,
//! an activation-chance formula and effect payloads. The aggregator folds the
//! passive and combat-start payloads into a [`crate::ModifierSet`]; the
//! per-strike payloads are interpreted by [`crate::engine::TableHooks`].

use std::collections::BTreeMap;

use crate::error::TableError;
use crate::modifiers::{Effectiveness, RangeOverride, StatScaling};
use crate::state::UnitStats;

pub type AbilityId = String;

/// When an ability is consulted.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Trigger {
    /// Always-on bonuses for the owner.
    Passive,
    /// Bonuses granted to allies within `range`.
    PassiveAura,
    /// Bonuses that apply if the condition holds when combat begins.
    OnCombatStart,
    /// Rolled after each landed strike by the owner.
    OnAttack,
    /// Rolled when the owner takes a landed strike.
    OnDefend,
    /// Consulted by the turn scheduler, never during combat.
    OnTurnStart,
}

/// State predicate gating combat-start abilities, affixes and accessories.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    /// `current_hp <= floor(max / 2)`
    Below50,
    /// `current_hp > floor(max * 3 / 4)`
    Above75,
    /// An ally stands at Manhattan distance 1.
    AdjacentAlly,
    /// An enemy stands at Manhattan distance 1.
    AdjacentEnemy,
    /// The owner started this exchange.
    Initiating,
    /// The owner is defending and `current_hp > floor(max / 2)`.
    DefendingAbove50,
    /// The owner stands on terrain with this name.
    OnTerrain(String),
}

/// Formula turning a stat line into an activation percentage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ActivationFormula {
    Skl,
    SklHalf,
    LckQuarter,
    Spd,
    Lck,
}

impl ActivationFormula {
    /// Activation chance in percent.
    pub fn chance(self, stats: &UnitStats) -> i32 {
        match self {
            Self::Skl => stats.skill,
            Self::SklHalf => stats.skill.div_euclid(2),
            Self::LckQuarter => stats.luck.div_euclid(4),
            Self::Spd => stats.speed,
            Self::Lck => stats.luck,
        }
    }
}

/// Combat modifiers carried by passive, aura and combat-start abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityEffects {
    pub hit_bonus: i32,
    pub avoid_bonus: i32,
    pub crit_bonus: i32,
    pub atk_bonus: i32,
    pub def_bonus: i32,
    pub res_bonus: i32,
    pub spd_bonus: i32,
    pub range_bonus: i32,
    /// Range bonus applied only while a tome or light weapon is equipped.
    pub magic_range_bonus: i32,
    pub prevent_counter: bool,
    pub targets_res: bool,
    pub halve_physical: bool,
    pub vengeance: bool,
    pub ignore_terrain_avoid: bool,
    pub vantage: bool,
    pub quick_riposte: bool,
    pub desperation: bool,
    pub stat_scaling: Option<StatScaling>,
    pub effectiveness: Option<Effectiveness>,
    pub range_override: Option<RangeOverride>,
}

/// Damage category a defensive halving reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageCategory {
    Physical,
    Magical,
}

/// Effect of an on-attack ability once its activation roll passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeEffect {
    /// Damage scaled by `percent / 100`, floored.
    ///
    /// Luna uses 150: a flat approximation of halving the target's defense.
    DamageMultiplier { percent: i32 },
    /// Adds the target's defending stat to damage and heals by that amount.
    Siphon,
    /// Damage becomes exactly the target's remaining HP.
    Lethal,
    /// Heals the striker by damage actually dealt.
    HealByDamage,
    /// One immediate extra strike at `percent / 100` of phase damage.
    BonusStrike { percent: i32 },
    /// The target's next follow-up phase is cancelled.
    CancelFollowUp,
}

/// Effect of an on-defend ability once its activation roll passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefendEffect {
    /// Halves incoming damage of one category.
    HalveDamage { category: DamageCategory },
    /// Once per battle, a lethal hit leaves exactly 1 HP.
    LethalSave,
    /// The striker's follow-up phase is cancelled.
    CancelFollowUp,
}

/// Replaces a phase's strike count (Astra-class).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseOverride {
    pub strikes: u32,
    pub damage_percent: i32,
}

/// Healing performed by the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnStartEffect {
    /// Heals the owner by `percent` of max HP, at least 1.
    HealSelfPercent { percent: i32 },
    /// Heals each ally within range by a flat amount.
    HealAllies { amount: i32 },
}

/// One ability table row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityDef {
    pub id: AbilityId,
    pub name: String,
    pub trigger: Trigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub activation: Option<ActivationFormula>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: AbilityEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike: Option<StrikeEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defend: Option<DefendEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase_override: Option<PhaseOverride>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn_start: Option<TurnStartEffect>,
}

impl AbilityDef {
    pub fn new(id: impl Into<AbilityId>, name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger,
            condition: None,
            activation: None,
            range: 0,
            effects: AbilityEffects::default(),
            strike: None,
            defend: None,
            phase_override: None,
            turn_start: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_activation(mut self, activation: ActivationFormula) -> Self {
        self.activation = Some(activation);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: AbilityEffects) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_strike(mut self, strike: StrikeEffect) -> Self {
        self.strike = Some(strike);
        self
    }

    #[must_use]
    pub fn with_defend(mut self, defend: DefendEffect) -> Self {
        self.defend = Some(defend);
        self
    }

    #[must_use]
    pub fn with_phase_override(mut self, phase_override: PhaseOverride) -> Self {
        self.phase_override = Some(phase_override);
        self
    }

    #[must_use]
    pub fn with_turn_start(mut self, turn_start: TurnStartEffect) -> Self {
        self.turn_start = Some(turn_start);
        self
    }

    /// Activation chance for `stats`; abilities without a formula never roll.
    pub fn activation_chance(&self, stats: &UnitStats) -> i32 {
        self.activation.map_or(0, |f| f.chance(stats))
    }
}

/// Read-only ability lookup keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityTable {
    entries: BTreeMap<AbilityId, AbilityDef>,
}

impl AbilityTable {
    /// Builds a table, rejecting duplicate ids and unnamed rows.
    pub fn new(defs: impl IntoIterator<Item = AbilityDef>) -> Result<Self, TableError> {
        let mut entries = BTreeMap::new();
        for def in defs {
            if def.name.trim().is_empty() {
                return Err(TableError::MissingName {
                    kind: "ability",
                    id: def.id,
                });
            }
            if entries.contains_key(&def.id) {
                return Err(TableError::DuplicateId {
                    kind: "ability",
                    id: def.id,
                });
            }
            entries.insert(def.id.clone(), def);
        }
        Ok(Self { entries })
    }

    /// Looks up an ability. Unknown ids resolve to `None` and are skipped by
    /// every consumer.
    pub fn get(&self, id: &str) -> Option<&AbilityDef> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDef> {
        self.entries.values()
    }

    /// Resolves `ids` in order, skipping unknown ids and repeats.
    pub fn resolve<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a AbilityDef> + 'a
    where
        I: IntoIterator<Item = &'a AbilityId>,
        I::IntoIter: 'a,
    {
        let mut seen: Vec<&'a str> = Vec::new();
        ids.into_iter().filter_map(move |id| {
            if seen.contains(&id.as_str()) {
                return None;
            }
            seen.push(id.as_str());
            self.get(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(skill: i32, luck: i32, speed: i32) -> UnitStats {
        UnitStats {
            skill,
            luck,
            speed,
            ..UnitStats::default()
        }
    }

    #[test]
    fn activation_formulas() {
        let s = stats(15, 10, 12);
        assert_eq!(ActivationFormula::Skl.chance(&s), 15);
        assert_eq!(ActivationFormula::SklHalf.chance(&s), 7);
        assert_eq!(ActivationFormula::LckQuarter.chance(&s), 2);
        assert_eq!(ActivationFormula::Spd.chance(&s), 12);
        assert_eq!(ActivationFormula::Lck.chance(&s), 10);
        assert_eq!("skl_half".parse(), Ok(ActivationFormula::SklHalf));
    }

    #[test]
    fn missing_formula_never_activates() {
        let def = AbilityDef::new("x", "X", Trigger::OnAttack);
        assert_eq!(def.activation_chance(&stats(99, 99, 99)), 0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = AbilityTable::new([
            AbilityDef::new("sol", "Sol", Trigger::OnAttack),
            AbilityDef::new("sol", "Sol again", Trigger::OnAttack),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::DuplicateId {
                kind: "ability",
                id: "sol".into()
            }
        );
    }

    #[test]
    fn resolve_skips_unknown_and_repeated_ids() {
        let table = AbilityTable::new([
            AbilityDef::new("sol", "Sol", Trigger::OnAttack),
            AbilityDef::new("luna", "Luna", Trigger::OnAttack),
        ])
        .unwrap();
        let ids: Vec<AbilityId> = vec!["luna".into(), "ghost".into(), "sol".into(), "luna".into()];
        let names: Vec<&str> = table.resolve(&ids).map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Luna", "Sol"]);
        assert_eq!("passive-aura".parse(), Ok(Trigger::PassiveAura));
    }
}
