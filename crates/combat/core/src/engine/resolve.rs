//! Resolution engine.
//!
//! # Flow
//!
//! ```text
//! PRECOMPUTE -> ORDER_SELECT -> STRIKE_LOOP -> POST_COMBAT -> DONE
//! ```
//!
//! Per landed strike the damage passes, in order: crit multiplier, striker
//! on-attack abilities, target on-defend abilities (only while damage is
//! positive), target on-defend affixes, drain. HP is floored at 0 and the
//! loop stops as soon as either side dies.

use crate::config::CombatConfig;
use crate::engine::{
    CombatEvent, CombatHooks, CombatResult, Exchange, ExchangePlan, PoisonEffect, Side, SidePlan,
    StrikeContext, StrikeEvent,
};
use crate::env::RngOracle;
use crate::state::{BattleFlags, CombatUnit};

/// Resolves one exchange.
///
/// # Arguments
///
/// * `exchange` - Both combatants, distance, terrain, modifiers and config
/// * `hooks` - Trigger interpretation ([`crate::engine::TableHooks`] for data-driven play)
/// * `rng` - Sole source of randomness for this call
///
/// # Returns
///
/// The full event list and final state. A staff-wielding or unarmed attacker
/// yields an empty event list with both HP values untouched.
pub fn resolve<H, R>(exchange: &Exchange<'_>, hooks: &H, rng: &mut R) -> CombatResult
where
    H: CombatHooks + ?Sized,
    R: RngOracle,
{
    let Some(plan) = ExchangePlan::build(exchange) else {
        return CombatResult {
            attacker_hp: exchange.attacker.current_hp,
            defender_hp: exchange.defender.current_hp,
            attacker_died: exchange.attacker.current_hp <= 0,
            defender_died: exchange.defender.current_hp <= 0,
            attacker_flags: exchange.attacker.flags,
            defender_flags: exchange.defender.flags,
            ..CombatResult::default()
        };
    };

    let mut battle = Battle::new(exchange, &plan, hooks, rng);
    battle.run();
    battle.finish()
}

/// Mutable state of one resolution call.
struct Battle<'a, H: ?Sized, R> {
    units: [&'a CombatUnit; 2],
    plans: [SidePlan; 2],
    plan: &'a ExchangePlan,
    config: &'a CombatConfig,
    hooks: &'a H,
    rng: &'a mut R,
    hp: [i32; 2],
    flags: [BattleFlags; 2],
    /// Took a landed hit during this call.
    struck: [bool; 2],
    /// Follow-up phase of this side was cancelled.
    cancelled: [bool; 2],
    events: Vec<CombatEvent>,
    poison_effects: Vec<PoisonEffect>,
    strikes: u32,
}

impl<'a, H, R> Battle<'a, H, R>
where
    H: CombatHooks + ?Sized,
    R: RngOracle,
{
    /// Phases times per-phase cap, doubled for bonus strikes.
    const MAX_STRIKES: u32 =
        CombatConfig::MAX_PHASES as u32 * CombatConfig::MAX_PHASE_STRIKES * 2;

    fn new(exchange: &Exchange<'a>, plan: &'a ExchangePlan, hooks: &'a H, rng: &'a mut R) -> Self {
        let (attacker, defender) = (exchange.attacker, exchange.defender);
        Self {
            units: [attacker, defender],
            plans: [plan.attacker, plan.defender],
            plan,
            config: exchange.config,
            hooks,
            rng,
            hp: [attacker.current_hp, defender.current_hp],
            flags: [attacker.flags, defender.flags],
            struck: [false; 2],
            cancelled: [false; 2],
            events: Vec::new(),
            poison_effects: Vec::new(),
            strikes: 0,
        }
    }

    fn both_alive(&self) -> bool {
        self.hp[0] > 0 && self.hp[1] > 0
    }

    fn run(&mut self) {
        let order = self.plan.order;
        if let Some((side, name)) = order.announcement() {
            self.announce(side, name.to_string());
        }

        let schedule = order.schedule(
            self.plans[0].doubles,
            self.plans[1].can_attack,
            self.plans[1].doubles,
        );
        for phase in schedule {
            if !self.both_alive() {
                break;
            }
            if phase.follow_up && self.cancelled[phase.side.index()] {
                continue;
            }
            self.phase(phase.side);
        }

        if self.both_alive() {
            self.poison();
        }
    }

    fn announce(&mut self, side: Side, name: String) {
        self.events.push(CombatEvent::Ability {
            unit: self.units[side.index()].id,
            name,
        });
    }

    fn phase(&mut self, side: Side) {
        let plan = self.plans[side.index()];
        let mut count = plan.strikes_per_phase();
        let mut damage = plan.damage;

        let striker = self.units[side.index()];
        if let Some(roll) = self.hooks.roll_phase_override(striker, &mut *self.rng) {
            count = roll.strikes;
            damage = (damage * roll.damage_percent).div_euclid(100).max(1);
            self.announce(side, roll.name);
        }

        for _ in 0..count.min(CombatConfig::MAX_PHASE_STRIKES) {
            if !self.both_alive() {
                break;
            }
            let bonus = self.strike(side, damage, true);
            if let Some(percent) = bonus {
                if self.both_alive() {
                    let bonus_damage = (damage * percent).div_euclid(100);
                    self.strike(side, bonus_damage, false);
                }
            }
        }
    }

    /// One strike by `side`. Returns the bonus-strike percent if one fired.
    fn strike(&mut self, side: Side, damage: i32, primary: bool) -> Option<i32> {
        let (s, t) = (side.index(), side.opponent().index());
        let plan = self.plans[s];
        let (striker, target) = (self.units[s], self.units[t]);
        self.strikes += 1;
        debug_assert!(self.strikes <= Self::MAX_STRIKES, "strike bound exceeded");

        let mut event = StrikeEvent {
            striker: striker.id,
            target: target.id,
            extra_strike: !primary,
            ..StrikeEvent::default()
        };

        if !self.rng.chance(plan.hit) {
            event.miss = true;
            event.target_hp_after = self.hp[t];
            event.striker_hp_after = self.hp[s];
            self.events.push(CombatEvent::Strike(event));
            return None;
        }

        event.crit = self.rng.chance(plan.crit);
        let damage = if event.crit {
            damage * self.config.crit_multiplier
        } else {
            damage
        };

        let ctx = StrikeContext {
            striker,
            target,
            striker_side: side,
            damage,
            striker_hp: self.hp[s],
            target_hp: self.hp[t],
            target_defense: plan.target_defense,
            physical: plan.physical,
            melee: self.plan.melee,
            first_hit: !self.flags[t].struck_this_phase && !self.struck[t],
            lethal_save_used: self.flags[t].lethal_save_used,
        };

        let mut bonus = None;
        let mut heal_by_damage = plan.drains;
        let mut heal = 0;
        let mut damage = damage;

        // Bonus strikes skip every roll: no striker abilities, no defensive
        // abilities or affixes on the target.
        if primary {
            let roll = self.hooks.roll_strike_abilities(&ctx, &mut *self.rng);
            damage = roll.damage.max(0);
            heal_by_damage |= roll.heal_by_damage;
            heal += roll.siphon_heal;
            bonus = roll.bonus_strike;
            if roll.cancel_follow_up {
                self.cancelled[t] = true;
            }
            event.activations.extend(roll.activations);

            if damage > 0 {
                let roll = self
                    .hooks
                    .roll_defend_abilities(&ctx.with_damage(damage), &mut *self.rng);
                damage = roll.damage.max(0);
                if roll.lethal_save {
                    self.flags[t].lethal_save_used = true;
                }
                if roll.cancel_follow_up {
                    self.cancelled[s] = true;
                }
                event.activations.extend(roll.activations);
            }

            let roll = self
                .hooks
                .roll_defend_affixes(&ctx.with_damage(damage), &mut *self.rng);
            damage = roll.damage.max(0);
            event.reflected = roll.reflected.max(0);
            event.reposition = roll.reposition;
            event.activations.extend(roll.activations);
        }

        if heal_by_damage && damage > 0 {
            heal += damage.min(self.hp[t]);
        }

        self.hp[t] = (self.hp[t] - damage).max(0);
        self.hp[s] = (self.hp[s] + heal).min(striker.stats.hp);
        self.hp[s] = (self.hp[s] - event.reflected).max(0);
        self.struck[t] = true;

        event.damage = damage;
        event.heal = heal;
        event.target_hp_after = self.hp[t];
        event.striker_hp_after = self.hp[s];
        self.events.push(CombatEvent::Strike(event));

        debug_assert!(self.hp.iter().all(|&hp| hp >= 0), "HP below zero");
        bonus
    }

    fn poison(&mut self) {
        let attacker_poison = self.plans[0].poison;
        if attacker_poison > 0 {
            self.hp[1] = (self.hp[1] - attacker_poison).max(1);
            self.push_poison(Side::Defender, attacker_poison);
        }
        let defender_poison = if self.plans[1].can_attack {
            self.plans[1].poison
        } else {
            0
        };
        if defender_poison > 0 {
            self.hp[0] = (self.hp[0] - defender_poison).max(1);
            self.push_poison(Side::Attacker, defender_poison);
        }
    }

    fn push_poison(&mut self, target: Side, damage: i32) {
        self.poison_effects.push(PoisonEffect { target, damage });
    }

    fn finish(self) -> CombatResult {
        let mut flags = self.flags;
        for (flag, struck) in flags.iter_mut().zip(self.struck) {
            flag.struck_this_phase |= struck;
        }
        CombatResult {
            events: self.events,
            attacker_hp: self.hp[0],
            defender_hp: self.hp[1],
            attacker_died: self.hp[0] <= 0,
            defender_died: self.hp[1] <= 0,
            poison: self.poison_effects,
            attacker_flags: flags[0],
            defender_flags: flags[1],
        }
    }
}
