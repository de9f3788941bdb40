//! Staff healing and use counts.

use crate::env::{Weapon, WeaponRange};
use crate::state::CombatUnit;

/// Result of one heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealOutcome {
    pub amount: i32,
    pub target_hp_after: i32,
}

/// HP restored by `staff`: `min(MAG + heal base, missing HP)`.
pub fn heal_amount(staff: &Weapon, healer: &CombatUnit, target: &CombatUnit) -> i32 {
    let base = staff.staff.as_ref().map_or(0, |s| s.heal_base);
    (healer.stats.magic + base).min(target.missing_hp()).max(0)
}

/// Heal without mutating anything; the caller applies `target_hp_after`.
pub fn resolve_heal(staff: &Weapon, healer: &CombatUnit, target: &CombatUnit) -> HealOutcome {
    let amount = heal_amount(staff, healer, target);
    HealOutcome {
        amount,
        target_hp_after: target.current_hp + amount,
    }
}

/// One extra use per MAG threshold reached.
pub fn bonus_uses(magic: i32, thresholds: &[i32]) -> u32 {
    thresholds.iter().filter(|&&t| magic >= t).count() as u32
}

pub fn staff_max_uses(staff: &Weapon, healer: &CombatUnit, thresholds: &[i32]) -> u32 {
    let base = staff.staff.as_ref().map_or(0, |s| s.uses);
    base + bonus_uses(healer.stats.magic, thresholds)
}

/// Uses left after `spent`; usage counts are caller-owned.
pub fn remaining_uses(staff: &Weapon, healer: &CombatUnit, thresholds: &[i32], spent: u32) -> u32 {
    staff_max_uses(staff, healer, thresholds).saturating_sub(spent)
}

/// Base staff range plus every MAG-gated bonus the healer qualifies for.
pub fn effective_staff_range(staff: &Weapon, healer: &CombatUnit) -> WeaponRange {
    let bonus: u32 = staff
        .staff
        .as_ref()
        .map(|s| {
            s.range_bonuses
                .iter()
                .filter(|rb| healer.stats.magic >= rb.magic)
                .map(|rb| rb.bonus)
                .sum()
        })
        .unwrap_or(0);
    WeaponRange::new(staff.range.min, staff.range.max + bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::env::{StaffProfile, StaffRangeBonus, WeaponCategory};
    use crate::state::{UnitId, UnitStats};

    fn healer(magic: i32) -> CombatUnit {
        CombatUnit::new(
            UnitId(1),
            "Serra",
            UnitStats {
                hp: 20,
                magic,
                ..UnitStats::default()
            },
        )
    }

    fn mend() -> Weapon {
        Weapon::new("Mend", WeaponCategory::Staff, 0, 0, 0, 4).with_staff(StaffProfile {
            heal_base: 20,
            uses: 2,
            range_bonuses: vec![StaffRangeBonus { magic: 10, bonus: 1 }],
        })
    }

    #[test]
    fn heal_is_capped_by_missing_hp() {
        let target = CombatUnit::new(
            UnitId(2),
            "Lyn",
            UnitStats {
                hp: 30,
                ..UnitStats::default()
            },
        )
        .with_hp(5);
        let outcome = resolve_heal(&mend(), &healer(4), &target);
        assert_eq!(outcome, HealOutcome { amount: 24, target_hp_after: 29 });

        let full = target.with_hp(30);
        assert_eq!(heal_amount(&mend(), &healer(4), &full), 0);
    }

    #[test]
    fn uses_scale_with_magic() {
        let thresholds = CombatConfig::DEFAULT_STAFF_BONUS_USE_THRESHOLDS;
        assert_eq!(bonus_uses(7, &thresholds), 0);
        assert_eq!(bonus_uses(8, &thresholds), 1);
        assert_eq!(bonus_uses(20, &thresholds), 3);
        assert_eq!(staff_max_uses(&mend(), &healer(14), &thresholds), 4);
        assert_eq!(remaining_uses(&mend(), &healer(14), &thresholds, 3), 1);
        assert_eq!(remaining_uses(&mend(), &healer(14), &thresholds, 9), 0);
    }

    #[test]
    fn staff_range_bonus() {
        assert_eq!(effective_staff_range(&mend(), &healer(9)), WeaponRange::new(1, 1));
        assert_eq!(effective_staff_range(&mend(), &healer(10)), WeaponRange::new(1, 2));
    }
}
