//! Weapon triangle: Sword beats Axe, Axe beats Lance, Lance beats Sword.

use crate::config::TriangleTable;
use crate::env::{Weapon, WeaponCategory};
use crate::state::WeaponRank;

/// Hit and damage adjustment from the triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangleBonus {
    pub hit: i32,
    pub damage: i32,
}

impl TriangleBonus {
    pub const NONE: Self = Self { hit: 0, damage: 0 };

    pub const fn new(hit: i32, damage: i32) -> Self {
        Self { hit, damage }
    }
}

/// Outcome of one category against another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Matchup {
    Advantage,
    Disadvantage,
    Neutral,
}

impl Matchup {
    #[must_use]
    pub fn inverted(self) -> Self {
        match self {
            Self::Advantage => Self::Disadvantage,
            Self::Disadvantage => Self::Advantage,
            Self::Neutral => Self::Neutral,
        }
    }
}

/// Raw triangle matchup between two categories, ignoring capabilities.
///
/// Neutral whenever either side is outside the triangle.
pub fn matchup(attacker: WeaponCategory, defender: WeaponCategory) -> Matchup {
    if !attacker.in_triangle() || !defender.in_triangle() {
        return Matchup::Neutral;
    }
    if attacker.beats() == Some(defender) {
        Matchup::Advantage
    } else if defender.beats() == Some(attacker) {
        Matchup::Disadvantage
    } else {
        Matchup::Neutral
    }
}

/// Triangle bonus for `attacker` striking into `defender`.
///
/// # Arguments
///
/// * `rank` - Attacker's weapon rank; mastery selects the mastery magnitudes
/// * `table` - Magnitudes from [`crate::CombatConfig::triangle`]
///
/// A reaver weapon swaps advantage and disadvantage. A triangle-ignore weapon
/// clamps negative results to zero.
pub fn triangle_bonus(
    attacker: &Weapon,
    defender: &Weapon,
    rank: WeaponRank,
    table: &TriangleTable,
) -> TriangleBonus {
    let mut outcome = matchup(attacker.category, defender.category);
    if attacker.capabilities.is_reaver() {
        outcome = outcome.inverted();
    }

    let mastery = rank == WeaponRank::Mast;
    let mut bonus = match (outcome, mastery) {
        (Matchup::Advantage, false) => table.advantage,
        (Matchup::Advantage, true) => table.mastery_advantage,
        (Matchup::Disadvantage, false) => table.disadvantage,
        (Matchup::Disadvantage, true) => table.mastery_disadvantage,
        (Matchup::Neutral, _) => TriangleBonus::NONE,
    };

    if attacker.capabilities.ignores_triangle() {
        bonus.hit = bonus.hit.max(0);
        bonus.damage = bonus.damage.max(0);
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapon(category: WeaponCategory) -> Weapon {
        Weapon::new("w", category, 5, 80, 0, 5)
    }

    #[test]
    fn advantage_and_disadvantage() {
        let table = TriangleTable::default();
        let sword = weapon(WeaponCategory::Sword);
        let axe = weapon(WeaponCategory::Axe);
        assert_eq!(
            triangle_bonus(&sword, &axe, WeaponRank::Prof, &table),
            TriangleBonus::new(10, 1)
        );
        assert_eq!(
            triangle_bonus(&axe, &sword, WeaponRank::Prof, &table),
            TriangleBonus::new(-10, -1)
        );
        assert_eq!(
            triangle_bonus(&sword, &axe, WeaponRank::Mast, &table),
            TriangleBonus::new(15, 2)
        );
        assert_eq!(
            triangle_bonus(&axe, &sword, WeaponRank::Mast, &table),
            TriangleBonus::new(-5, -1)
        );
    }

    #[test]
    fn non_triangle_weapons_are_neutral() {
        let table = TriangleTable::default();
        let bow = weapon(WeaponCategory::Bow);
        let sword = weapon(WeaponCategory::Sword);
        assert_eq!(
            triangle_bonus(&bow, &sword, WeaponRank::Mast, &table),
            TriangleBonus::NONE
        );
        assert_eq!(
            triangle_bonus(&sword, &sword, WeaponRank::Prof, &table),
            TriangleBonus::NONE
        );
    }

    #[test]
    fn reaver_inverts() {
        let table = TriangleTable::default();
        let lancereaver = weapon(WeaponCategory::Sword).with_special("Reverses weapon triangle");
        let lance = weapon(WeaponCategory::Lance);
        let axe = weapon(WeaponCategory::Axe);
        let sword = weapon(WeaponCategory::Sword);
        // base disadvantage becomes advantage magnitude
        assert_eq!(
            triangle_bonus(&lancereaver, &lance, WeaponRank::Prof, &table),
            TriangleBonus::new(10, 1)
        );
        // base advantage becomes disadvantage magnitude
        assert_eq!(
            triangle_bonus(&lancereaver, &axe, WeaponRank::Prof, &table),
            TriangleBonus::new(-10, -1)
        );
        assert_eq!(
            triangle_bonus(&lancereaver, &sword, WeaponRank::Prof, &table),
            TriangleBonus::NONE
        );
    }

    #[test]
    fn triangle_ignore_clamps_negatives() {
        let table = TriangleTable::default();
        let axe = weapon(WeaponCategory::Axe).with_special("Ignores weapon triangle disadvantage");
        let sword = weapon(WeaponCategory::Sword);
        let lance = weapon(WeaponCategory::Lance);
        assert_eq!(
            triangle_bonus(&axe, &sword, WeaponRank::Prof, &table),
            TriangleBonus::NONE
        );
        assert_eq!(
            triangle_bonus(&axe, &lance, WeaponRank::Prof, &table),
            TriangleBonus::new(10, 1)
        );
    }
}
