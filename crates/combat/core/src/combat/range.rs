use crate::env::{Weapon, WeaponRange};
use crate::modifiers::{CombatFlags, ModifierSet};

/// Reach of `weapon` after modifiers.
///
/// A range override replaces the weapon's range; the range bonus then extends
/// the far bound.
pub fn attack_range(weapon: &Weapon, modifiers: &ModifierSet) -> WeaponRange {
    modifiers
        .range_override
        .map_or(weapon.range, |o| o.range())
        .extended(modifiers.range_bonus)
}

/// Whether the defender can answer an attack from `distance` tiles.
///
/// Staves and empty hands never counter. The attacker's prevent-counter
/// modifier blocks any counter.
pub fn can_counter(
    weapon: Option<&Weapon>,
    distance: u32,
    defender_mods: &ModifierSet,
    attacker_mods: &ModifierSet,
) -> bool {
    if attacker_mods.has(CombatFlags::PREVENT_COUNTER) {
        return false;
    }
    match weapon {
        Some(w) if !w.category.is_staff() => attack_range(w, defender_mods).contains(distance),
        _ => false,
    }
}
