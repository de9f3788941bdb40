//! Attack speed and follow-up eligibility.

use crate::env::Weapon;
use crate::state::{Stat, UnitStats};

/// Weight penalty after strength offsets it.
///
/// # Formula
///
/// ```text
/// effective_weight = max(0, weight - floor(STR / 5))
/// ```
pub fn effective_weight(weapon: Option<&Weapon>, stats: &UnitStats) -> i32 {
    match weapon {
        Some(w) if w.weight > 0 => (w.weight - stats.strength.div_euclid(5)).max(0),
        _ => 0,
    }
}

/// Attack speed.
///
/// # Formula
///
/// ```text
/// AS = SPD - effective_weight + weapon SPD bonus + extra
/// ```
///
/// Staves and empty hands ignore weight entirely: `AS = SPD + extra`.
pub fn effective_speed(stats: &UnitStats, weapon: Option<&Weapon>, extra: i32) -> i32 {
    match weapon {
        Some(w) if !w.category.is_staff() => {
            stats.speed - effective_weight(Some(w), stats)
                + w.capabilities.stat_bonus(Stat::Spd)
                + extra
        }
        _ => stats.speed + extra,
    }
}

/// Inputs deciding whether one side strikes twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Doubling {
    pub speed: i32,
    pub opponent_speed: i32,
    /// Accessory reduction of this side's threshold.
    pub pursuit_reduction: i32,
    /// The opponent's accessory forbids being doubled.
    pub prevented: bool,
    /// A weapon art is active on this side this exchange.
    pub weapon_art_active: bool,
    /// Quick-riposte applies (defending, can counter, above half HP).
    pub quick_riposte: bool,
}

impl Doubling {
    pub fn doubles(&self, threshold: i32) -> bool {
        if self.quick_riposte {
            return true;
        }
        if self.weapon_art_active || self.prevented {
            return false;
        }
        self.speed >= self.opponent_speed + threshold - self.pursuit_reduction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WeaponCategory;

    fn stats(strength: i32, speed: i32) -> UnitStats {
        UnitStats {
            strength,
            speed,
            ..UnitStats::default()
        }
    }

    #[test]
    fn strength_offsets_weight() {
        let axe = Weapon::new("Steel Axe", WeaponCategory::Axe, 11, 65, 0, 15);
        // 15 - floor(12 / 5) = 13
        assert_eq!(effective_weight(Some(&axe), &stats(12, 10)), 13);
        assert_eq!(effective_weight(Some(&axe), &stats(80, 10)), 0);
        assert_eq!(effective_weight(None, &stats(12, 10)), 0);
    }

    #[test]
    fn speed_includes_weapon_bonus() {
        let sword = Weapon::new("Wind Sword", WeaponCategory::Sword, 9, 80, 0, 7)
            .with_special("+3 SPD when equipped");
        // 12 - max(0, 7 - 2) + 3 + 1 = 11
        assert_eq!(effective_speed(&stats(10, 12), Some(&sword), 1), 11);
    }

    #[test]
    fn staff_ignores_weight() {
        let staff = Weapon::new("Heal", WeaponCategory::Staff, 0, 0, 0, 20);
        assert_eq!(effective_speed(&stats(0, 9), Some(&staff), 2), 11);
        assert_eq!(effective_speed(&stats(0, 9), None, 0), 9);
    }

    #[test]
    fn doubling_rules() {
        let base = Doubling {
            speed: 15,
            opponent_speed: 10,
            ..Doubling::default()
        };
        assert!(base.doubles(5));
        assert!(!Doubling { speed: 14, ..base }.doubles(5));
        assert!(
            Doubling {
                speed: 13,
                pursuit_reduction: 2,
                ..base
            }
            .doubles(5)
        );
        assert!(!Doubling { prevented: true, ..base }.doubles(5));
        assert!(!Doubling { weapon_art_active: true, ..base }.doubles(5));
        assert!(
            Doubling {
                speed: 0,
                quick_riposte: true,
                ..base
            }
            .doubles(5)
        );
    }
}
