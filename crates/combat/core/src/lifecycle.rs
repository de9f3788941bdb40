//! Out-of-combat triggers: turn start, death, and post-combat affix chips.
//!
//! These helpers only describe what should happen. The caller's turn
//! scheduler applies the returned effects to its own unit state.

use crate::env::{AbilityTable, AffixTable, AffixTrigger, StatDebuff, Trigger, TurnStartEffect};
use crate::modifiers::Activation;
use crate::state::{CombatUnit, UnitId};

/// HP restored to one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealEffect {
    pub target: UnitId,
    pub source: UnitId,
    pub amount: i32,
    /// Ability or affix name.
    pub name: String,
}

/// Area damage landing on one unit when another dies.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaDamage {
    pub target: UnitId,
    pub amount: i32,
    pub hp_after: i32,
    pub name: String,
}

/// On-attack affix payload for a combat in which the attacker landed a hit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAffixEffects {
    pub poison_damage: i32,
    pub debuffs: Vec<StatDebuff>,
    pub activated: Vec<Activation>,
}

impl AttackAffixEffects {
    pub fn is_empty(&self) -> bool {
        self.poison_damage == 0 && self.debuffs.is_empty()
    }
}

/// Heals produced at the start of `unit`'s turn.
///
/// # Arguments
///
/// * `unit` - Unit whose turn begins
/// * `allies` - Same-side units; `unit` itself is skipped if present
/// * `abilities` - On-turn-start ability rows
/// * `affixes` - On-turn-start affix rows
///
/// # Returns
///
/// One entry per unit actually healed. Units already at full HP and dead
/// allies never appear.
pub fn turn_start_effects(
    unit: &CombatUnit,
    allies: &[CombatUnit],
    abilities: &AbilityTable,
    affixes: &AffixTable,
) -> Vec<HealEffect> {
    let mut out = Vec::new();
    if unit.current_hp <= 0 {
        return out;
    }

    for def in abilities.resolve(&unit.skills) {
        if def.trigger != Trigger::OnTurnStart {
            continue;
        }
        match def.turn_start {
            Some(TurnStartEffect::HealSelfPercent { percent }) => {
                let amount = (unit.stats.hp * percent).div_euclid(100).max(1);
                push_heal(&mut out, unit, unit.id, amount, &def.name);
            }
            Some(TurnStartEffect::HealAllies { amount }) if amount > 0 => {
                let range = def.range.max(1);
                for ally in allies {
                    if ally.id == unit.id || ally.current_hp <= 0 {
                        continue;
                    }
                    if unit.position.distance(&ally.position) <= range {
                        push_heal(&mut out, ally, unit.id, amount, &def.name);
                    }
                }
            }
            _ => {}
        }
    }

    for def in affixes.resolve(&unit.affixes) {
        if def.trigger != AffixTrigger::OnTurnStart || def.effects.heal_self_percent <= 0 {
            continue;
        }
        let amount = (unit.stats.hp * def.effects.heal_self_percent).div_euclid(100);
        push_heal(&mut out, unit, unit.id, amount, &def.name);
    }

    out
}

fn push_heal(out: &mut Vec<HealEffect>, target: &CombatUnit, source: UnitId, amount: i32, name: &str) {
    let amount = amount.min(target.missing_hp());
    if amount <= 0 {
        return;
    }
    out.push(HealEffect {
        target: target.id,
        source,
        amount,
        name: name.to_string(),
    });
}

/// Area damage triggered by `unit`'s death.
///
/// Every living unit in `others` within the affix range (at least 1) takes
/// the full amount; HP never drops below 0.
pub fn death_effects(unit: &CombatUnit, others: &[CombatUnit], affixes: &AffixTable) -> Vec<AreaDamage> {
    let mut out = Vec::new();
    for def in affixes.resolve(&unit.affixes) {
        if def.trigger != AffixTrigger::OnDeath || def.effects.aoe_damage <= 0 {
            continue;
        }
        let range = def.range.max(1);
        for other in others {
            if other.id == unit.id || other.current_hp <= 0 {
                continue;
            }
            if unit.position.distance(&other.position) > range {
                continue;
            }
            out.push(AreaDamage {
                target: other.id,
                amount: def.effects.aoe_damage,
                hp_after: (other.current_hp - def.effects.aoe_damage).max(0),
                name: def.name.clone(),
            });
        }
    }
    out
}

/// Sums the attacker's on-attack affixes.
pub fn attack_affix_effects(attacker: &CombatUnit, affixes: &AffixTable) -> AttackAffixEffects {
    let mut out = AttackAffixEffects::default();
    for def in affixes.resolve(&attacker.affixes) {
        if def.trigger != AffixTrigger::OnAttack {
            continue;
        }
        let mut fired = false;
        if def.effects.poison_damage > 0 {
            out.poison_damage += def.effects.poison_damage;
            fired = true;
        }
        if let Some(debuff) = def.effects.debuff {
            out.debuffs.push(debuff);
            fired = true;
        }
        if fired {
            out.activated.push(Activation::affix(def.id.as_str(), def.name.as_str()));
        }
    }
    out
}
