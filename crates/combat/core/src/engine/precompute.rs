//! Pre-roll math shared by the forecast and the resolution engine.
//!
//! Both entry points build an [`ExchangePlan`] through [`ExchangePlan::build`]
//! and read every number from it, so a preview can never disagree with the
//! numbers the strike loop rolls against.

use crate::combat::{
    Doubling, TriangleBonus, attack_power, avoid, base_damage, can_counter, clamp_percent,
    combined_effectiveness, crit_rate, defending_stat, defense_against, effective_speed, hit_rate,
    triangle_bonus,
};
use crate::config::CombatConfig;
use crate::engine::PhaseOrder;
use crate::env::{AffixTable, Terrain, Weapon};
use crate::modifiers::{CombatFlags, ModifierSet};
use crate::state::{CombatUnit, Stat};

/// Modifier sets for both sides, with optional weapon-art sets merged in
/// through [`ModifierSet::merge_optional`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModifierContext {
    pub attacker: Option<ModifierSet>,
    pub attacker_art: Option<ModifierSet>,
    pub defender: Option<ModifierSet>,
    pub defender_art: Option<ModifierSet>,
}

impl ModifierContext {
    pub fn new(attacker: ModifierSet, defender: ModifierSet) -> Self {
        Self {
            attacker: Some(attacker),
            defender: Some(defender),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attacker_art(mut self, art: ModifierSet) -> Self {
        self.attacker_art = Some(art);
        self
    }

    #[must_use]
    pub fn with_defender_art(mut self, art: ModifierSet) -> Self {
        self.defender_art = Some(art);
        self
    }

    /// Attacker's effective set; empty when nothing was supplied.
    pub fn attacker_set(&self) -> ModifierSet {
        ModifierSet::merge_optional(self.attacker.clone(), self.attacker_art.clone())
            .unwrap_or_default()
    }

    pub fn defender_set(&self) -> ModifierSet {
        ModifierSet::merge_optional(self.defender.clone(), self.defender_art.clone())
            .unwrap_or_default()
    }
}

/// Everything one forecast or resolution call reads.
///
/// Weapons travel on the units; terrain is the tile under each combatant.
#[derive(Clone, Copy, Debug)]
pub struct Exchange<'a> {
    pub attacker: &'a CombatUnit,
    pub defender: &'a CombatUnit,
    pub distance: u32,
    pub attacker_terrain: Option<&'a Terrain>,
    pub defender_terrain: Option<&'a Terrain>,
    pub modifiers: &'a ModifierContext,
    pub config: &'a CombatConfig,
    /// Needed only for forecast warnings.
    pub affixes: Option<&'a AffixTable>,
}

impl<'a> Exchange<'a> {
    /// Distance defaults to the Manhattan distance between the two units.
    pub fn new(
        attacker: &'a CombatUnit,
        defender: &'a CombatUnit,
        modifiers: &'a ModifierContext,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            attacker,
            defender,
            distance: attacker.position.distance(&defender.position),
            attacker_terrain: None,
            defender_terrain: None,
            modifiers,
            config,
            affixes: None,
        }
    }

    #[must_use]
    pub fn at_distance(mut self, distance: u32) -> Self {
        self.distance = distance;
        self
    }

    #[must_use]
    pub fn with_terrain(
        mut self,
        attacker_terrain: Option<&'a Terrain>,
        defender_terrain: Option<&'a Terrain>,
    ) -> Self {
        self.attacker_terrain = attacker_terrain;
        self.defender_terrain = defender_terrain;
        self
    }

    #[must_use]
    pub fn with_affixes(mut self, affixes: &'a AffixTable) -> Self {
        self.affixes = Some(affixes);
        self
    }
}

/// Pre-roll numbers for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidePlan {
    /// Attacker: holds a combat weapon. Defender: can counter.
    pub can_attack: bool,
    pub damage: i32,
    pub hit: i32,
    pub crit: i32,
    pub attack_speed: i32,
    pub doubles: bool,
    pub brave: bool,
    /// Weapon category is physical, for category-specific mitigation.
    pub physical: bool,
    pub drains: bool,
    /// Target's resisting stat, added by siphon-class effects.
    pub target_defense: i32,
    pub poison: i32,
}

impl SidePlan {
    pub fn strikes_per_phase(&self) -> u32 {
        if self.brave { 2 } else { 1 }
    }

    /// Strikes this side attempts if nothing is cancelled or killed.
    pub fn attack_count(&self) -> u32 {
        if !self.can_attack {
            return 0;
        }
        self.strikes_per_phase() * if self.doubles { 2 } else { 1 }
    }
}

/// Shared precompute for one exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangePlan {
    pub attacker: SidePlan,
    pub defender: SidePlan,
    pub attacker_mods: ModifierSet,
    pub defender_mods: ModifierSet,
    pub order: PhaseOrder,
    pub melee: bool,
}

/// One strike direction.
struct Direction<'a> {
    striker: &'a CombatUnit,
    weapon: &'a Weapon,
    target: &'a CombatUnit,
    target_terrain: Option<&'a Terrain>,
    striker_mods: &'a ModifierSet,
    target_mods: &'a ModifierSet,
    is_initiating: bool,
    config: &'a CombatConfig,
}

impl Direction<'_> {
    fn triangle(&self) -> TriangleBonus {
        self.target.weapon.as_ref().map_or(TriangleBonus::NONE, |tw| {
            triangle_bonus(self.weapon, tw, self.striker.weapon_rank, &self.config.triangle)
        })
    }

    /// Damage pipeline:
    ///
    /// ```text
    /// base   = max(0, attack - defense - terrain DEF)
    /// dmg    = max(0, base + atk bonus - def bonus [- res bonus] - weapon guard)
    /// dmg   += floor(stat / divisor)       (stat scaling)
    /// dmg   += missing HP                   (vengeance)
    /// dmg    = floor(dmg / 2)               (target halves physical)
    /// ```
    fn damage(&self, triangle: TriangleBonus) -> i32 {
        let mods = self.striker_mods;
        let effectiveness = combined_effectiveness(self.weapon, self.target, mods, self.config);
        let attack = attack_power(
            &self.striker.stats,
            self.weapon,
            triangle,
            effectiveness,
            self.is_initiating,
        );
        let targets_res = mods.has(CombatFlags::TARGETS_RES);
        let defense = defense_against(&self.target.stats, self.weapon, targets_res);
        let base = base_damage(attack, defense, Terrain::def_of(self.target_terrain));

        let resisted_with = defending_stat(self.weapon, targets_res);
        let res_bonus = if resisted_with == Stat::Res {
            self.target_mods.res_bonus
        } else {
            0
        };
        let weapon_guard = self
            .target
            .weapon
            .as_ref()
            .map_or(0, |tw| tw.capabilities.stat_bonus(resisted_with));

        let mut damage =
            (base + mods.atk_bonus - self.target_mods.def_bonus - res_bonus - weapon_guard).max(0);
        if let Some(scaling) = mods.stat_scaling {
            damage += scaling.bonus(self.striker.stats.get(scaling.stat));
        }
        if mods.has(CombatFlags::VENGEANCE) {
            damage += self.striker.missing_hp();
        }
        if self.target_mods.has(CombatFlags::HALVE_PHYSICAL) && self.weapon.is_physical() {
            damage = damage.div_euclid(2);
        }
        damage.max(0)
    }

    fn hit(&self, triangle: TriangleBonus) -> i32 {
        let terrain = if self.striker_mods.has(CombatFlags::IGNORE_TERRAIN_AVOID) {
            None
        } else {
            self.target_terrain
        };
        let rate = hit_rate(
            &self.striker.stats,
            self.weapon,
            triangle,
            avoid(&self.target.stats, terrain),
        );
        clamp_percent(rate + self.striker_mods.hit_bonus - self.target_mods.avoid_bonus)
    }

    fn crit(&self) -> i32 {
        clamp_percent(
            crit_rate(&self.striker.stats, self.weapon, &self.target.stats)
                + self.striker_mods.crit_bonus,
        )
    }

    fn plan(&self) -> SidePlan {
        let triangle = self.triangle();
        let targets_res = self.striker_mods.has(CombatFlags::TARGETS_RES);
        SidePlan {
            can_attack: true,
            damage: self.damage(triangle),
            hit: self.hit(triangle),
            crit: self.crit(),
            physical: self.weapon.is_physical(),
            drains: self.weapon.capabilities.drains(),
            target_defense: defense_against(&self.target.stats, self.weapon, targets_res),
            poison: self.weapon.capabilities.poison(),
            brave: self.weapon.capabilities.is_brave(),
            ..SidePlan::default()
        }
    }
}

impl ExchangePlan {
    /// Builds the plan, or `None` when the attacker has no combat weapon.
    pub fn build(exchange: &Exchange<'_>) -> Option<Self> {
        let Exchange {
            attacker,
            defender,
            distance,
            config,
            ..
        } = *exchange;
        let attacker_weapon = attacker.combat_weapon()?;
        let attacker_mods = exchange.modifiers.attacker_set();
        let defender_mods = exchange.modifiers.defender_set();

        let mut attacker_plan = Direction {
            striker: attacker,
            weapon: attacker_weapon,
            target: defender,
            target_terrain: exchange.defender_terrain,
            striker_mods: &attacker_mods,
            target_mods: &defender_mods,
            is_initiating: true,
            config,
        }
        .plan();

        let counter = can_counter(
            defender.weapon.as_ref(),
            distance,
            &defender_mods,
            &attacker_mods,
        );
        let mut defender_plan = match defender.combat_weapon().filter(|_| counter) {
            Some(weapon) => Direction {
                striker: defender,
                weapon,
                target: attacker,
                target_terrain: exchange.attacker_terrain,
                striker_mods: &defender_mods,
                target_mods: &attacker_mods,
                is_initiating: false,
                config,
            }
            .plan(),
            None => SidePlan::default(),
        };

        let attacker_speed =
            effective_speed(&attacker.stats, attacker.weapon.as_ref(), attacker_mods.spd_bonus);
        let defender_speed =
            effective_speed(&defender.stats, defender.weapon.as_ref(), defender_mods.spd_bonus);
        let attacker_gear = attacker.accessory.as_ref().map(|a| &a.combat);
        let defender_gear = defender.accessory.as_ref().map(|a| &a.combat);

        attacker_plan.attack_speed = attacker_speed;
        attacker_plan.doubles = Doubling {
            speed: attacker_speed,
            opponent_speed: defender_speed,
            pursuit_reduction: attacker_gear.map_or(0, |g| g.double_threshold_reduction),
            prevented: defender_gear.is_some_and(|g| g.prevent_enemy_double),
            weapon_art_active: attacker_mods.has(CombatFlags::WEAPON_ART),
            quick_riposte: false,
        }
        .doubles(config.double_threshold);

        defender_plan.attack_speed = defender_speed;
        defender_plan.doubles = counter
            && Doubling {
                speed: defender_speed,
                opponent_speed: attacker_speed,
                pursuit_reduction: defender_gear.map_or(0, |g| g.double_threshold_reduction),
                prevented: attacker_gear.is_some_and(|g| g.prevent_enemy_double),
                weapon_art_active: defender_mods.has(CombatFlags::WEAPON_ART),
                quick_riposte: defender_mods.has(CombatFlags::QUICK_RIPOSTE)
                    && defender.is_above_half(),
            }
            .doubles(config.double_threshold);

        let order = PhaseOrder::select(
            defender_mods.has(CombatFlags::VANTAGE),
            counter,
            attacker_mods.has(CombatFlags::DESPERATION),
            attacker_plan.doubles,
        );

        Some(Self {
            attacker: attacker_plan,
            defender: defender_plan,
            attacker_mods,
            defender_mods,
            order,
            melee: distance == 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Accessory, AccessoryEffects, WeaponCategory};
    use crate::modifiers::StatScaling;
    use crate::state::{UnitId, UnitStats};

    fn fighter(id: u32, strength: i32, speed: i32, defense: i32) -> CombatUnit {
        CombatUnit::new(
            UnitId(id),
            format!("f{id}"),
            UnitStats {
                hp: 30,
                strength,
                skill: 10,
                speed,
                luck: 5,
                defense,
                ..UnitStats::default()
            },
        )
    }

    fn sword() -> Weapon {
        Weapon::new("Iron Sword", WeaponCategory::Sword, 5, 90, 0, 0)
    }

    #[test]
    fn ten_damage_baseline() {
        let a = fighter(1, 10, 10, 0).with_weapon(sword());
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        let plan = ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        assert_eq!(plan.attacker.damage, 10);
        assert!(plan.defender.can_attack);
        assert_eq!(plan.order, PhaseOrder::Normal);
        assert!(plan.melee);
    }

    #[test]
    fn unarmed_attacker_has_no_plan() {
        let a = fighter(1, 10, 10, 0);
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        assert!(ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config)).is_none());
    }

    #[test]
    fn adjustments_apply_in_order() {
        let a = fighter(1, 10, 10, 0).with_weapon(sword()).with_hp(20);
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let attacker = ModifierSet {
            atk_bonus: 2,
            flags: CombatFlags::VENGEANCE,
            stat_scaling: Some(StatScaling {
                stat: Stat::Spd,
                divisor: 4,
            }),
            ..ModifierSet::default()
        };
        let defender = ModifierSet {
            def_bonus: 3,
            flags: CombatFlags::HALVE_PHYSICAL,
            ..ModifierSet::default()
        };
        let ctx = ModifierContext::new(attacker, defender);
        let config = CombatConfig::default();
        let plan = ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        // (10 + 2 - 3) + floor(10 / 4) + 10 missing = 21, halved = 10
        assert_eq!(plan.attacker.damage, 10);
    }

    #[test]
    fn doubling_rules_per_side() {
        let a = fighter(1, 10, 16, 0).with_weapon(sword());
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        let plan = ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        assert!(plan.attacker.doubles);
        assert!(!plan.defender.doubles);
        assert_eq!(plan.attacker.attack_count(), 2);

        let shield = Accessory::new(
            "Guard Ring",
            AccessoryEffects {
                prevent_enemy_double: true,
                ..AccessoryEffects::default()
            },
        );
        let guarded = d.clone().with_accessory(shield);
        let plan = ExchangePlan::build(&Exchange::new(&a, &guarded, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        assert!(!plan.attacker.doubles);

        let art = ModifierContext::default().with_attacker_art(ModifierSet {
            flags: CombatFlags::WEAPON_ART,
            ..ModifierSet::default()
        });
        let plan = ExchangePlan::build(&Exchange::new(&a, &d, &art, &config).at_distance(1))
            .expect("armed attacker");
        assert!(!plan.attacker.doubles);
    }

    #[test]
    fn quick_riposte_needs_half_hp() {
        let a = fighter(1, 10, 10, 0).with_weapon(sword());
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let riposte = ModifierSet {
            flags: CombatFlags::QUICK_RIPOSTE,
            ..ModifierSet::default()
        };
        let ctx = ModifierContext::new(ModifierSet::default(), riposte);
        let config = CombatConfig::default();

        let healthy = ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        assert!(healthy.defender.doubles);

        let hurt = d.clone().with_hp(15);
        let plan = ExchangePlan::build(&Exchange::new(&a, &hurt, &ctx, &config).at_distance(1))
            .expect("armed attacker");
        assert!(!plan.defender.doubles);

        // no counter at range 2, so no follow-up either
        let ranged = ExchangePlan::build(&Exchange::new(&a, &d, &ctx, &config).at_distance(2))
            .expect("armed attacker");
        assert!(!ranged.defender.can_attack);
        assert!(!ranged.defender.doubles);
    }

    #[test]
    fn ignore_terrain_avoid() {
        let a = fighter(1, 10, 10, 0).with_weapon(sword());
        let d = fighter(2, 0, 10, 5).with_weapon(sword());
        let forest = Terrain::new("Forest", 20, 1);
        let config = CombatConfig::default();

        let plain_ctx = ModifierContext::default();
        let plan = ExchangePlan::build(
            &Exchange::new(&a, &d, &plain_ctx, &config)
                .at_distance(1)
                .with_terrain(None, Some(&forest)),
        )
        .expect("armed attacker");
        // 90 + 20 + 5 - (20 + 5 + 20) = 70; terrain DEF 1
        assert_eq!(plan.attacker.hit, 70);
        assert_eq!(plan.attacker.damage, 9);

        let piercing = ModifierContext::new(
            ModifierSet {
                flags: CombatFlags::IGNORE_TERRAIN_AVOID,
                ..ModifierSet::default()
            },
            ModifierSet::default(),
        );
        let plan = ExchangePlan::build(
            &Exchange::new(&a, &d, &piercing, &config)
                .at_distance(1)
                .with_terrain(None, Some(&forest)),
        )
        .expect("armed attacker");
        assert_eq!(plan.attacker.hit, 90);
    }
}
