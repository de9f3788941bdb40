//! Attack, defense and damage.

use crate::combat::TriangleBonus;
use crate::env::Weapon;
use crate::state::{Stat, UnitStats};

/// Attack power of `weapon` in the wielder's hands.
///
/// # Formula
///
/// ```text
/// attack = (MAG if uses_magic else STR)
///        + counter bonus (only when not initiating)
///        + might * effectiveness
///        + triangle damage
/// ```
pub fn attack_power(
    stats: &UnitStats,
    weapon: &Weapon,
    triangle: TriangleBonus,
    effectiveness: i32,
    is_initiating: bool,
) -> i32 {
    let stat = weapon.attack_stat();
    let counter = if is_initiating {
        0
    } else {
        weapon.capabilities.counter_bonus(stat)
    };
    stats.get(stat) + counter + weapon.might * effectiveness.max(1) + triangle.damage
}

/// Stat the defender resists `incoming` with.
pub fn defending_stat(incoming: &Weapon, targets_res: bool) -> Stat {
    if targets_res || incoming.uses_magic() {
        Stat::Res
    } else {
        Stat::Def
    }
}

/// Defender's resisting stat against `incoming`.
///
/// RES against magic (or when `targets_res` forces it), DEF otherwise. A
/// sundering weapon halves the value, floored, unless `targets_res` is set.
pub fn defense_against(defender: &UnitStats, incoming: &Weapon, targets_res: bool) -> i32 {
    let value = defender.get(defending_stat(incoming, targets_res));
    if !targets_res && incoming.capabilities.sunders() {
        value.div_euclid(2)
    } else {
        value
    }
}

/// `max(0, attack - defense - terrain DEF)`
pub fn base_damage(attack: i32, defense: i32, terrain_def: i32) -> i32 {
    (attack - defense - terrain_def).max(0)
}

/// New HP after taking `damage`, floored at 0.
pub fn apply_damage(current_hp: i32, damage: i32) -> i32 {
    (current_hp - damage.max(0)).max(0)
}
