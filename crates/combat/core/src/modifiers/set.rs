//! Normalized bundle of combat modifiers for one combatant.

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::env::WeaponRange;
use crate::state::{MoveType, Stat};

bitflags! {
    /// Boolean modifiers. Merging two sets takes the union.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CombatFlags: u16 {
        /// The opponent cannot counter this exchange.
        const PREVENT_COUNTER      = 1 << 0;
        /// Damage is always resisted with RES.
        const TARGETS_RES          = 1 << 1;
        /// Incoming physical damage is halved.
        const HALVE_PHYSICAL       = 1 << 2;
        /// Missing HP is added to damage.
        const VENGEANCE            = 1 << 3;
        /// A weapon art is active; the owner cannot double.
        const WEAPON_ART           = 1 << 4;
        /// The opponent's terrain avoid is ignored.
        const IGNORE_TERRAIN_AVOID = 1 << 5;
        /// Strikes first when countering.
        const VANTAGE              = 1 << 6;
        /// Always doubles when countering above half HP.
        const QUICK_RIPOSTE        = 1 << 7;
        /// Both attacker strikes resolve before the counter.
        const DESPERATION          = 1 << 8;
    }
}

/// Bonus damage of `floor(stat / divisor)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatScaling {
    pub stat: Stat,
    pub divisor: i32,
}

impl StatScaling {
    pub fn bonus(&self, value: i32) -> i32 {
        value.div_euclid(self.divisor.max(1))
    }

    /// Merge rule: the smaller divisor (stronger scaling) wins, ties broken
    /// by stat order. A total-order minimum keeps merging commutative.
    fn merge(self, other: Self) -> Self {
        if (other.divisor, other.stat) < (self.divisor, self.stat) {
            other
        } else {
            self
        }
    }
}

/// Ability-sourced effectiveness against movement types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effectiveness {
    pub move_types: BTreeSet<MoveType>,
    pub multiplier: i32,
}

impl Effectiveness {
    pub fn new(move_types: impl IntoIterator<Item = MoveType>, multiplier: i32) -> Self {
        Self {
            move_types: move_types.into_iter().collect(),
            multiplier,
        }
    }

    /// Multiplier against `move_type`, at least 1.
    pub fn against(&self, move_type: MoveType) -> i32 {
        if self.move_types.contains(&move_type) {
            self.multiplier.max(1)
        } else {
            1
        }
    }

    /// Merge rule: union of movement types, larger multiplier.
    fn merge(mut self, other: Self) -> Self {
        self.move_types.extend(other.move_types);
        self.multiplier = self.multiplier.max(other.multiplier);
        self
    }
}

/// Replacement attack range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeOverride {
    pub min: u32,
    pub max: u32,
}

impl RangeOverride {
    pub fn range(&self) -> WeaponRange {
        WeaponRange::new(self.min, self.max.max(self.min))
    }

    /// Merge rule: the farther reach wins, ties broken by the nearer minimum.
    fn merge(self, other: Self) -> Self {
        if (other.max, core::cmp::Reverse(other.min)) > (self.max, core::cmp::Reverse(self.min)) {
            other
        } else {
            self
        }
    }
}

/// Where an activated modifier came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivationSource {
    Ability,
    Affix,
    Accessory,
    WeaponArt,
}

/// Record of a modifier or trigger that fired, for logs and UI.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activation {
    pub source: ActivationSource,
    pub id: String,
    pub name: String,
}

impl Activation {
    pub fn new(source: ActivationSource, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            source,
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn ability(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ActivationSource::Ability, id, name)
    }

    pub fn affix(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ActivationSource::Affix, id, name)
    }
}

/// Everything that adjusts one combatant's numbers for one exchange.
///
/// # Merge
///
/// [`merge`](Self::merge) combines two sets field by field:
///
/// | field                         | rule                                   |
/// |-------------------------------|----------------------------------------|
/// | numeric bonuses               | sum                                    |
/// | `flags`                       | union                                  |
/// | `stat_scaling`                | smaller divisor, then lower stat       |
/// | `effectiveness`               | union of types, larger multiplier      |
/// | `range_override`              | larger max, then smaller min           |
/// | `activated`                   | concatenation, `self` first            |
///
/// Every rule except `activated` is associative and commutative, so the
/// numbers never depend on whether skills or weapon-art modifiers are merged
/// first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModifierSet {
    pub hit_bonus: i32,
    pub avoid_bonus: i32,
    pub crit_bonus: i32,
    pub atk_bonus: i32,
    /// Subtracted from every incoming strike.
    pub def_bonus: i32,
    /// Subtracted from incoming strikes resisted with RES.
    pub res_bonus: i32,
    pub spd_bonus: i32,
    pub range_bonus: i32,
    pub flags: CombatFlags,
    pub stat_scaling: Option<StatScaling>,
    pub effectiveness: Option<Effectiveness>,
    pub range_override: Option<RangeOverride>,
    pub activated: Vec<Activation>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, flag: CombatFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Combine two sets; see the type-level table for per-field rules.
    #[must_use]
    pub fn merge(mut self, other: ModifierSet) -> ModifierSet {
        self.hit_bonus += other.hit_bonus;
        self.avoid_bonus += other.avoid_bonus;
        self.crit_bonus += other.crit_bonus;
        self.atk_bonus += other.atk_bonus;
        self.def_bonus += other.def_bonus;
        self.res_bonus += other.res_bonus;
        self.spd_bonus += other.spd_bonus;
        self.range_bonus += other.range_bonus;
        self.flags |= other.flags;
        self.stat_scaling = merge_option(self.stat_scaling, other.stat_scaling, StatScaling::merge);
        self.effectiveness =
            merge_option(self.effectiveness, other.effectiveness, Effectiveness::merge);
        self.range_override =
            merge_option(self.range_override, other.range_override, RangeOverride::merge);
        self.activated.extend(other.activated);
        self
    }

    /// Merge two possibly-absent sets. Absent on both sides stays absent.
    pub fn merge_optional(
        base: Option<ModifierSet>,
        extra: Option<ModifierSet>,
    ) -> Option<ModifierSet> {
        merge_option(base, extra, ModifierSet::merge)
    }
}

impl core::iter::Sum for ModifierSet {
    fn sum<I: Iterator<Item = ModifierSet>>(iter: I) -> Self {
        iter.fold(ModifierSet::default(), ModifierSet::merge)
    }
}

fn merge_option<T>(a: Option<T>, b: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(merge(a, b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(hit: i32, flags: CombatFlags, divisor: i32) -> ModifierSet {
        ModifierSet {
            hit_bonus: hit,
            atk_bonus: hit / 2,
            flags,
            stat_scaling: Some(StatScaling {
                stat: Stat::Spd,
                divisor,
            }),
            ..ModifierSet::default()
        }
    }

    fn numbers(set: &ModifierSet) -> ModifierSet {
        ModifierSet {
            activated: Vec::new(),
            ..set.clone()
        }
    }

    #[test]
    fn numeric_sum_and_flag_union() {
        let a = sample(10, CombatFlags::VANTAGE, 3);
        let b = sample(-4, CombatFlags::DESPERATION, 2);
        let merged = a.merge(b);
        assert_eq!(merged.hit_bonus, 6);
        assert!(merged.has(CombatFlags::VANTAGE | CombatFlags::DESPERATION));
        assert_eq!(merged.stat_scaling.map(|s| s.divisor), Some(2));
    }

    #[test]
    fn merge_is_commutative_for_numbers() {
        let mut a = sample(10, CombatFlags::VANTAGE, 3);
        a.effectiveness = Some(Effectiveness::new([MoveType::Flying], 2));
        a.range_override = Some(RangeOverride { min: 1, max: 2 });
        let mut b = sample(5, CombatFlags::TARGETS_RES, 3);
        b.stat_scaling = Some(StatScaling {
            stat: Stat::Def,
            divisor: 3,
        });
        b.effectiveness = Some(Effectiveness::new([MoveType::Armored], 3));
        b.range_override = Some(RangeOverride { min: 2, max: 2 });

        let ab = a.clone().merge(b.clone());
        let ba = b.merge(a);
        assert_eq!(numbers(&ab), numbers(&ba));
        assert_eq!(
            ab.effectiveness,
            Some(Effectiveness::new([MoveType::Flying, MoveType::Armored], 3))
        );
        assert_eq!(ab.range_override, Some(RangeOverride { min: 1, max: 2 }));
    }

    #[test]
    fn activations_concatenate_in_order() {
        let mut a = ModifierSet::default();
        a.activated.push(Activation::ability("wrath", "Wrath"));
        let mut b = ModifierSet::default();
        b.activated.push(Activation::affix("warded", "Warded"));
        let merged = a.merge(b);
        let ids: Vec<&str> = merged.activated.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["wrath", "warded"]);
    }

    #[test]
    fn optional_merge() {
        assert_eq!(ModifierSet::merge_optional(None, None), None);
        let a = sample(3, CombatFlags::empty(), 2);
        assert_eq!(ModifierSet::merge_optional(Some(a.clone()), None), Some(a.clone()));
        assert_eq!(ModifierSet::merge_optional(None, Some(a.clone())), Some(a.clone()));
        let both = ModifierSet::merge_optional(Some(a.clone()), Some(a)).unwrap();
        assert_eq!(both.hit_bonus, 6);
    }

    #[test]
    fn effectiveness_against() {
        let eff = Effectiveness::new([MoveType::Cavalry], 2);
        assert_eq!(eff.against(MoveType::Cavalry), 2);
        assert_eq!(eff.against(MoveType::Flying), 1);
    }
}
