use crate::combat::{TriangleBonus, attack_power, effective_speed, effective_weight};
use crate::env::Weapon;
use crate::state::CombatUnit;

/// Opponent-free numbers for status screens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticCombatStats {
    pub attack: i32,
    pub attack_speed: i32,
    pub hit: i32,
    pub crit: i32,
    pub weight: i32,
}

/// Attack, speed, hit and crit without a defender.
///
/// Hit and crit are left unclamped since no avoid or luck is subtracted yet.
/// Staves and empty hands report zeros with `attack_speed = SPD`.
pub fn static_combat_stats(unit: &CombatUnit, weapon: Option<&Weapon>) -> StaticCombatStats {
    let Some(weapon) = weapon.filter(|w| !w.category.is_staff()) else {
        return StaticCombatStats {
            attack_speed: unit.stats.speed,
            ..StaticCombatStats::default()
        };
    };

    StaticCombatStats {
        attack: attack_power(&unit.stats, weapon, TriangleBonus::NONE, 1, true),
        attack_speed: effective_speed(&unit.stats, Some(weapon), 0),
        hit: weapon.hit + unit.stats.skill * 2 + unit.stats.luck,
        crit: unit.stats.skill.div_euclid(2) + weapon.crit,
        weight: effective_weight(Some(weapon), &unit.stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WeaponCategory;
    use crate::state::{UnitId, UnitStats};

    #[test]
    fn status_screen_numbers() {
        let unit = CombatUnit::new(
            UnitId(1),
            "Eliwood",
            UnitStats {
                hp: 20,
                strength: 6,
                skill: 7,
                speed: 9,
                luck: 7,
                ..UnitStats::default()
            },
        );
        let rapier = Weapon::new("Rapier", WeaponCategory::Sword, 7, 95, 10, 5);
        let stats = static_combat_stats(&unit, Some(&rapier));
        assert_eq!(
            stats,
            StaticCombatStats {
                attack: 13,
                attack_speed: 5,
                hit: 116,
                crit: 13,
                weight: 4,
            }
        );
    }

    #[test]
    fn staff_reports_zeros() {
        let unit = CombatUnit::new(
            UnitId(1),
            "Priscilla",
            UnitStats {
                speed: 11,
                ..UnitStats::default()
            },
        );
        let heal = Weapon::new("Heal", WeaponCategory::Staff, 0, 0, 0, 2);
        let stats = static_combat_stats(&unit, Some(&heal));
        assert_eq!(stats.attack_speed, 11);
        assert_eq!(stats.attack, 0);
        assert_eq!(static_combat_stats(&unit, None).attack_speed, 11);
    }
}
