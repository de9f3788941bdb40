//! Forecast engine: the RNG-free preview shown before committing to an attack.
//!
//! Every number comes from [`ExchangePlan::build`], the same precompute the
//! resolution engine rolls against.

use crate::engine::{Exchange, ExchangePlan, SidePlan};
use crate::env::{AffixTable, AffixTrigger, DefendAffix};
use crate::modifiers::{Activation, ModifierSet};
use crate::state::{CombatUnit, UnitId};

/// Affix reactions the attacker should know about before striking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The opponent's first landed hit this phase will deal 0.
    Shielded,
    /// Melee damage will be partly reflected.
    Thorns,
    /// The opponent will warp away after taking damage.
    Teleporter,
}

/// One side of a forecast.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidePreview {
    pub unit: UnitId,
    pub name: String,
    pub hp: i32,
    /// Attacker: holds a combat weapon. Defender: can counter.
    pub can_attack: bool,
    pub damage: i32,
    pub hit: i32,
    pub crit: i32,
    pub attack_speed: i32,
    pub doubles: bool,
    pub brave: bool,
    pub attack_count: u32,
    pub activated: Vec<Activation>,
    pub warnings: Vec<Warning>,
}

impl SidePreview {
    fn idle(unit: &CombatUnit) -> Self {
        Self {
            unit: unit.id,
            name: unit.name.clone(),
            hp: unit.current_hp,
            ..Self::default()
        }
    }

    fn from_plan(unit: &CombatUnit, plan: &SidePlan, mods: &ModifierSet) -> Self {
        Self {
            unit: unit.id,
            name: unit.name.clone(),
            hp: unit.current_hp,
            can_attack: plan.can_attack,
            damage: plan.damage,
            hit: plan.hit,
            crit: plan.crit,
            attack_speed: plan.attack_speed,
            doubles: plan.doubles,
            brave: plan.brave,
            attack_count: plan.attack_count(),
            activated: mods.activated.clone(),
            warnings: Vec::new(),
        }
    }
}

/// Symmetric preview of one exchange.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    pub attacker: SidePreview,
    pub defender: SidePreview,
}

impl Forecast {
    pub fn defender_can_counter(&self) -> bool {
        self.defender.can_attack
    }
}

/// Previews an exchange without drawing randomness.
///
/// A staff-wielding or unarmed attacker yields a zeroed, non-combat preview
/// carrying only names and HP.
pub fn forecast(exchange: &Exchange<'_>) -> Forecast {
    let (attacker, defender) = (exchange.attacker, exchange.defender);
    let Some(plan) = ExchangePlan::build(exchange) else {
        return Forecast {
            attacker: SidePreview::idle(attacker),
            defender: SidePreview::idle(defender),
        };
    };

    let mut attacker_side = SidePreview::from_plan(attacker, &plan.attacker, &plan.attacker_mods);
    let mut defender_side = SidePreview::from_plan(defender, &plan.defender, &plan.defender_mods);

    if let Some(affixes) = exchange.affixes {
        attacker_side.warnings = warnings(affixes, defender, plan.attacker.damage, plan.melee);
        defender_side.warnings = warnings(affixes, attacker, plan.defender.damage, plan.melee);
    }

    Forecast {
        attacker: attacker_side,
        defender: defender_side,
    }
}

/// Warnings facing whoever strikes `target` for `damage`.
fn warnings(affixes: &AffixTable, target: &CombatUnit, damage: i32, melee: bool) -> Vec<Warning> {
    let mut out = Vec::new();
    for def in affixes.resolve(&target.affixes) {
        if def.trigger != AffixTrigger::OnDefend {
            continue;
        }
        let warning = match def.defend {
            Some(DefendAffix::NegateFirstHit) if !target.flags.struck_this_phase => {
                Warning::Shielded
            }
            Some(DefendAffix::ReflectMelee { .. }) if melee && damage > 0 => Warning::Thorns,
            Some(DefendAffix::Reposition { .. }) if damage > 0 => Warning::Teleporter,
            _ => continue,
        };
        if !out.contains(&warning) {
            out.push(warning);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::engine::ModifierContext;
    use crate::env::{AffixDef, Weapon, WeaponCategory, WeaponRange};
    use crate::state::{Faction, UnitStats};

    fn unit(id: u32, speed: i32) -> CombatUnit {
        CombatUnit::new(
            UnitId(id),
            format!("u{id}"),
            UnitStats {
                hp: 25,
                strength: 10,
                skill: 8,
                speed,
                luck: 4,
                defense: 5,
                ..UnitStats::default()
            },
        )
    }

    fn lance() -> Weapon {
        Weapon::new("Iron Lance", WeaponCategory::Lance, 7, 80, 0, 0)
    }

    #[test]
    fn staff_attacker_gets_idle_preview() {
        let healer = unit(1, 5).with_weapon(Weapon::new("Heal", WeaponCategory::Staff, 0, 0, 0, 2));
        let target = unit(2, 5).with_weapon(lance());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        let f = forecast(&Exchange::new(&healer, &target, &ctx, &config).at_distance(1));
        assert_eq!(f.attacker.damage, 0);
        assert_eq!(f.attacker.attack_count, 0);
        assert!(!f.defender_can_counter());
        assert_eq!(f.defender.hp, 25);
    }

    #[test]
    fn brave_and_doubling_counts() {
        let brave = Weapon::new("Brave Lance", WeaponCategory::Lance, 10, 75, 0, 0)
            .with_special("Strikes twice consecutively");
        let a = unit(1, 15).with_weapon(brave);
        let d = unit(2, 5).with_weapon(lance());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        let f = forecast(&Exchange::new(&a, &d, &ctx, &config).at_distance(1));
        assert!(f.attacker.brave);
        assert!(f.attacker.doubles);
        assert_eq!(f.attacker.attack_count, 4);
        assert_eq!(f.defender.attack_count, 1);
    }

    #[test]
    fn out_of_range_defender_is_silent() {
        let bow = Weapon::new("Iron Bow", WeaponCategory::Bow, 6, 85, 0, 0)
            .with_range(WeaponRange::new(2, 2));
        let a = unit(1, 5).with_weapon(bow);
        let d = unit(2, 5).with_weapon(lance());
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();
        let f = forecast(&Exchange::new(&a, &d, &ctx, &config).at_distance(2));
        assert!(!f.defender_can_counter());
        assert_eq!((f.defender.damage, f.defender.hit, f.defender.crit), (0, 0, 0));
    }

    #[test]
    fn affix_warnings() {
        let affixes = AffixTable::new([
            AffixDef::new("shielded", "Shielded", AffixTrigger::OnDefend)
                .with_defend(DefendAffix::NegateFirstHit),
            AffixDef::new("thorns", "Thorns", AffixTrigger::OnDefend)
                .with_defend(DefendAffix::ReflectMelee { percent: 30 }),
            AffixDef::new("teleporter", "Teleporter", AffixTrigger::OnDefend)
                .with_defend(DefendAffix::Reposition { range: 3 }),
        ])
        .expect("valid table");
        let a = unit(1, 5).with_weapon(lance());
        let d = unit(2, 5)
            .with_weapon(lance())
            .with_faction(Faction::Enemy)
            .with_affixes(["shielded", "thorns", "teleporter"]);
        let ctx = ModifierContext::default();
        let config = CombatConfig::default();

        let melee = forecast(
            &Exchange::new(&a, &d, &ctx, &config)
                .at_distance(1)
                .with_affixes(&affixes),
        );
        assert_eq!(
            melee.attacker.warnings,
            vec![Warning::Shielded, Warning::Thorns, Warning::Teleporter]
        );
        assert!(melee.defender.warnings.is_empty());

        let mut struck = d.clone();
        struck.flags.struck_this_phase = true;
        let later = forecast(
            &Exchange::new(&a, &struck, &ctx, &config)
                .at_distance(1)
                .with_affixes(&affixes),
        );
        assert!(!later.attacker.warnings.contains(&Warning::Shielded));
    }
}
