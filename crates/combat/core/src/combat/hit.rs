//! Avoid, hit and critical rates.

use crate::combat::TriangleBonus;
use crate::env::{Terrain, Weapon};
use crate::state::UnitStats;

/// Clamp to a 0..=100 percentage.
pub fn clamp_percent(value: i32) -> i32 {
    value.clamp(0, 100)
}

/// `SPD * 2 + LCK + terrain avoid`
pub fn avoid(stats: &UnitStats, terrain: Option<&Terrain>) -> i32 {
    stats.speed * 2 + stats.luck + Terrain::avoid_of(terrain)
}

/// Hit chance.
///
/// # Formula
///
/// ```text
/// hit = clamp(weapon.hit + SKL * 2 + LCK + triangle hit - defender avoid)
/// ```
pub fn hit_rate(
    attacker: &UnitStats,
    weapon: &Weapon,
    triangle: TriangleBonus,
    defender_avoid: i32,
) -> i32 {
    clamp_percent(weapon.hit + attacker.skill * 2 + attacker.luck + triangle.hit - defender_avoid)
}

/// Critical chance.
///
/// # Formula
///
/// ```text
/// crit = clamp(floor(SKL / 2) + weapon.crit - defender LCK)
/// ```
pub fn crit_rate(attacker: &UnitStats, weapon: &Weapon, defender: &UnitStats) -> i32 {
    clamp_percent(attacker.skill.div_euclid(2) + weapon.crit - defender.luck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WeaponCategory;

    fn stats(skill: i32, speed: i32, luck: i32) -> UnitStats {
        UnitStats {
            skill,
            speed,
            luck,
            ..UnitStats::default()
        }
    }

    #[test]
    fn avoid_includes_terrain() {
        let forest = Terrain::new("Forest", 20, 1);
        assert_eq!(avoid(&stats(0, 8, 4), None), 20);
        assert_eq!(avoid(&stats(0, 8, 4), Some(&forest)), 40);
    }

    #[test]
    fn hit_clamps() {
        let sword = Weapon::new("Iron Sword", WeaponCategory::Sword, 5, 95, 0, 5);
        // 95 + 20 + 5 - 25 = 95
        assert_eq!(hit_rate(&stats(10, 10, 5), &sword, TriangleBonus::NONE, 25), 95);
        assert_eq!(hit_rate(&stats(10, 10, 5), &sword, TriangleBonus::NONE, 0), 100);
        assert_eq!(hit_rate(&stats(0, 0, 0), &sword, TriangleBonus::NONE, 200), 0);
    }

    #[test]
    fn crit_floors_half_skill() {
        let killer = Weapon::new("Killing Edge", WeaponCategory::Sword, 9, 75, 30, 7);
        // floor(11 / 2) + 30 - 4 = 31
        assert_eq!(crit_rate(&stats(11, 0, 0), &killer, &stats(0, 0, 4)), 31);
        assert_eq!(crit_rate(&stats(0, 0, 0), &killer, &stats(0, 0, 50)), 0);
    }
}
