//! Effectiveness multipliers against movement types.

use crate::config::CombatConfig;
use crate::env::{Weapon, WeaponCategory};
use crate::modifiers::ModifierSet;
use crate::state::{CombatUnit, MoveType};

/// Multiplier from the weapon alone.
///
/// Every bow is effective against flying units at
/// [`CombatConfig::bow_vs_flying`]; otherwise the weapon's own "effective vs"
/// capability applies when the defender's movement type matches.
pub fn weapon_effectiveness(weapon: &Weapon, defender: &CombatUnit, config: &CombatConfig) -> i32 {
    if weapon.category == WeaponCategory::Bow && defender.move_type == MoveType::Flying {
        return config.bow_vs_flying;
    }
    weapon
        .capabilities
        .effective_against(defender.move_type)
        .unwrap_or(1)
}

/// Final might multiplier for one strike direction.
///
/// An accessory negating effectiveness forces 1x. When both the weapon and
/// the attacker's modifiers are effective, the multipliers compound up to
/// [`CombatConfig::effectiveness_cap`]; otherwise the larger one applies.
pub fn combined_effectiveness(
    weapon: &Weapon,
    defender: &CombatUnit,
    modifiers: &ModifierSet,
    config: &CombatConfig,
) -> i32 {
    let negated = defender
        .accessory
        .as_ref()
        .is_some_and(|a| a.combat.negate_effectiveness);
    if negated {
        return 1;
    }

    let from_weapon = weapon_effectiveness(weapon, defender, config);
    let from_modifiers = modifiers
        .effectiveness
        .as_ref()
        .map_or(1, |e| e.against(defender.move_type));

    if from_weapon > 1 && from_modifiers > 1 {
        (from_weapon * from_modifiers).min(config.effectiveness_cap)
    } else {
        from_weapon.max(from_modifiers).max(1)
    }
}
