//! Per-strike trigger hooks.
//!
//! The strike loop owns ordering and HP bookkeeping; hooks decide what
//! triggered abilities and affixes do to one strike. Every hook draws its
//! randomness from the handle it is given, never from anywhere else.
//!
//! [`TableHooks`] interprets the ability and affix tables. [`NoHooks`] turns
//! every trigger off, which leaves bare weapon math.

use crate::engine::Side;
use crate::env::{
    AbilityDef, AbilityTable, AffixTable, AffixTrigger, DamageCategory, DefendAffix, DefendEffect,
    RngOracle, StrikeEffect, Trigger,
};
use crate::modifiers::Activation;
use crate::state::CombatUnit;

/// View of one landed strike handed to every hook stage.
#[derive(Clone, Copy, Debug)]
pub struct StrikeContext<'a> {
    pub striker: &'a CombatUnit,
    pub target: &'a CombatUnit,
    pub striker_side: Side,
    /// Damage entering this stage.
    pub damage: i32,
    /// In-combat HP, not the caller's stored value.
    pub striker_hp: i32,
    pub target_hp: i32,
    /// Target's resisting stat against this strike.
    pub target_defense: i32,
    pub physical: bool,
    pub melee: bool,
    /// No landed hit on the target yet this phase.
    pub first_hit: bool,
    pub lethal_save_used: bool,
}

impl StrikeContext<'_> {
    pub fn with_damage(self, damage: i32) -> Self {
        Self { damage, ..self }
    }
}

/// Outcome of the striker's on-attack abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrikeRoll {
    pub damage: i32,
    /// Heal by damage dealt once every stage has run.
    pub heal_by_damage: bool,
    /// Flat heal from siphon-class effects.
    pub siphon_heal: i32,
    /// Percent of phase damage for one bonus strike.
    pub bonus_strike: Option<i32>,
    pub cancel_follow_up: bool,
    pub activations: Vec<Activation>,
}

impl StrikeRoll {
    pub fn unchanged(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }
}

/// Outcome of the target's on-defend abilities.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DefendRoll {
    pub damage: i32,
    pub lethal_save: bool,
    pub cancel_follow_up: bool,
    pub activations: Vec<Activation>,
}

impl DefendRoll {
    pub fn unchanged(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }
}

/// Outcome of the target's on-defend affixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AffixRoll {
    pub damage: i32,
    pub reflected: i32,
    pub reposition: u32,
    pub activations: Vec<Activation>,
}

impl AffixRoll {
    pub fn unchanged(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }
}

/// Strike-count override for one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseRoll {
    pub strikes: u32,
    pub damage_percent: i32,
    pub name: String,
}

/// Trigger interpretation injected into the resolution engine.
///
/// Every method defaults to "nothing fires", so an implementation only
/// overrides the stages it cares about.
pub trait CombatHooks {
    /// Rolled once at the start of each executed phase.
    fn roll_phase_override(
        &self,
        _striker: &CombatUnit,
        _rng: &mut dyn RngOracle,
    ) -> Option<PhaseRoll> {
        None
    }

    /// Striker's on-attack abilities, after the crit multiplier.
    fn roll_strike_abilities(&self, ctx: &StrikeContext<'_>, _rng: &mut dyn RngOracle) -> StrikeRoll {
        StrikeRoll::unchanged(ctx.damage)
    }

    /// Target's on-defend abilities; only called while damage is positive.
    fn roll_defend_abilities(&self, ctx: &StrikeContext<'_>, _rng: &mut dyn RngOracle) -> DefendRoll {
        DefendRoll::unchanged(ctx.damage)
    }

    /// Target's on-defend affixes.
    fn roll_defend_affixes(&self, ctx: &StrikeContext<'_>, _rng: &mut dyn RngOracle) -> AffixRoll {
        AffixRoll::unchanged(ctx.damage)
    }
}

/// No triggers at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl CombatHooks for NoHooks {}

/// Table-driven hooks.
#[derive(Clone, Copy, Debug)]
pub struct TableHooks<'a> {
    pub abilities: &'a AbilityTable,
    pub affixes: &'a AffixTable,
}

impl<'a> TableHooks<'a> {
    pub fn new(abilities: &'a AbilityTable, affixes: &'a AffixTable) -> Self {
        Self {
            abilities,
            affixes,
        }
    }

    fn triggered<'s>(
        &'s self,
        unit: &'s CombatUnit,
        trigger: Trigger,
    ) -> impl Iterator<Item = &'s AbilityDef> + 's {
        self.abilities
            .resolve(&unit.skills)
            .filter(move |def| def.trigger == trigger)
    }
}

fn activates(def: &AbilityDef, unit: &CombatUnit, rng: &mut dyn RngOracle) -> bool {
    def.activation.is_some_and(|f| rng.chance(f.chance(&unit.stats)))
}

impl CombatHooks for TableHooks<'_> {
    fn roll_phase_override(
        &self,
        striker: &CombatUnit,
        rng: &mut dyn RngOracle,
    ) -> Option<PhaseRoll> {
        self.triggered(striker, Trigger::OnAttack)
            .filter_map(|def| def.phase_override.map(|o| (def, o)))
            .find(|(def, _)| activates(def, striker, rng))
            .map(|(def, o)| PhaseRoll {
                strikes: o.strikes,
                damage_percent: o.damage_percent,
                name: def.name.clone(),
            })
    }

    fn roll_strike_abilities(&self, ctx: &StrikeContext<'_>, rng: &mut dyn RngOracle) -> StrikeRoll {
        let mut roll = StrikeRoll::unchanged(ctx.damage);
        for def in self.triggered(ctx.striker, Trigger::OnAttack) {
            let Some(effect) = def.strike else { continue };
            if !activates(def, ctx.striker, rng) {
                continue;
            }
            match effect {
                StrikeEffect::DamageMultiplier { percent } => {
                    roll.damage = (roll.damage * percent).div_euclid(100);
                }
                StrikeEffect::Siphon => {
                    roll.damage += ctx.target_defense;
                    roll.siphon_heal += ctx.target_defense;
                }
                StrikeEffect::Lethal => roll.damage = ctx.target_hp,
                StrikeEffect::HealByDamage => roll.heal_by_damage = true,
                StrikeEffect::BonusStrike { percent } => roll.bonus_strike = Some(percent),
                StrikeEffect::CancelFollowUp => roll.cancel_follow_up = true,
            }
            roll.activations.push(Activation::ability(&def.id, &def.name));
        }
        roll
    }

    fn roll_defend_abilities(&self, ctx: &StrikeContext<'_>, rng: &mut dyn RngOracle) -> DefendRoll {
        let mut roll = DefendRoll::unchanged(ctx.damage);
        let mut save_used = ctx.lethal_save_used;
        for def in self.triggered(ctx.target, Trigger::OnDefend) {
            let Some(effect) = def.defend else { continue };
            if !activates(def, ctx.target, rng) {
                continue;
            }
            let fired = match effect {
                DefendEffect::HalveDamage { category } => {
                    let matches = match category {
                        DamageCategory::Physical => ctx.physical,
                        DamageCategory::Magical => !ctx.physical,
                    };
                    if matches {
                        roll.damage = roll.damage.div_euclid(2);
                    }
                    matches
                }
                DefendEffect::LethalSave => {
                    let lethal = ctx.target_hp > 0 && roll.damage >= ctx.target_hp;
                    if lethal && !save_used {
                        roll.damage = ctx.target_hp - 1;
                        roll.lethal_save = true;
                        save_used = true;
                        true
                    } else {
                        false
                    }
                }
                DefendEffect::CancelFollowUp => {
                    roll.cancel_follow_up = true;
                    true
                }
            };
            if fired {
                roll.activations.push(Activation::ability(&def.id, &def.name));
            }
        }
        roll
    }

    fn roll_defend_affixes(&self, ctx: &StrikeContext<'_>, _rng: &mut dyn RngOracle) -> AffixRoll {
        let mut roll = AffixRoll::unchanged(ctx.damage);
        for def in self.affixes.resolve(&ctx.target.affixes) {
            if def.trigger != AffixTrigger::OnDefend {
                continue;
            }
            let Some(effect) = def.defend else { continue };
            let fired = match effect {
                DefendAffix::NegateFirstHit if ctx.first_hit => {
                    roll.damage = 0;
                    true
                }
                DefendAffix::ReflectMelee { percent } if ctx.melee && roll.damage > 0 => {
                    roll.reflected = (roll.damage * percent).div_euclid(100);
                    true
                }
                DefendAffix::Reposition { range } if roll.damage > 0 => {
                    roll.reposition = range;
                    true
                }
                _ => false,
            };
            if fired {
                roll.activations.push(Activation::affix(&def.id, &def.name));
            }
        }
        roll
    }
}
