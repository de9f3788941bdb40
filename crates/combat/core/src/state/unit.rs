use crate::env::{AbilityId, Accessory, AffixId, Weapon};
use crate::state::UnitStats;

/// Unique identifier for a combatant within one battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl core::fmt::Display for UnitId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Grid coordinate supplied by the map layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Faction {
    #[default]
    Player,
    Enemy,
    Npc,
}

/// Movement class, used for effectiveness checks.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum MoveType {
    #[default]
    Infantry,
    Armored,
    Cavalry,
    Flying,
}

/// Weapon proficiency rank. Mastery sharpens triangle advantage and softens
/// disadvantage.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum WeaponRank {
    #[default]
    Prof,
    Mast,
}

/// Per-battle flags owned by the caller and reset between battles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleFlags {
    /// A once-per-battle lethal save has already fired.
    pub lethal_save_used: bool,
    /// The unit already took a landed hit during the current phase.
    pub struck_this_phase: bool,
}

/// A combatant as seen by one forecast or resolution call.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatUnit {
    pub id: UnitId,
    pub name: String,
    pub stats: UnitStats,
    /// Invariant between combats: `0 <= current_hp <= stats.hp`.
    pub current_hp: i32,
    pub weapon: Option<Weapon>,
    pub skills: Vec<AbilityId>,
    pub affixes: Vec<AffixId>,
    pub accessory: Option<Accessory>,
    pub faction: Faction,
    pub move_type: MoveType,
    pub weapon_rank: WeaponRank,
    pub position: Position,
    pub flags: BattleFlags,
}

impl CombatUnit {
    /// Creates a unit at full HP with no equipment.
    pub fn new(id: UnitId, name: impl Into<String>, stats: UnitStats) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            current_hp: stats.hp,
            weapon: None,
            skills: Vec::new(),
            affixes: Vec::new(),
            accessory: None,
            faction: Faction::default(),
            move_type: MoveType::default(),
            weapon_rank: WeaponRank::default(),
            position: Position::default(),
            flags: BattleFlags::default(),
        }
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AbilityId>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_affixes<I, S>(mut self, affixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AffixId>,
    {
        self.affixes = affixes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_accessory(mut self, accessory: Accessory) -> Self {
        self.accessory = Some(accessory);
        self
    }

    #[must_use]
    pub fn with_hp(mut self, current_hp: i32) -> Self {
        self.current_hp = current_hp.clamp(0, self.stats.hp);
        self
    }

    #[must_use]
    pub fn with_faction(mut self, faction: Faction) -> Self {
        self.faction = faction;
        self
    }

    #[must_use]
    pub fn with_move_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    #[must_use]
    pub fn with_rank(mut self, weapon_rank: WeaponRank) -> Self {
        self.weapon_rank = weapon_rank;
        self
    }

    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// HP lost so far, never negative.
    pub fn missing_hp(&self) -> i32 {
        (self.stats.hp - self.current_hp).max(0)
    }

    /// `current_hp <= floor(max / 2)`.
    pub fn is_below_half(&self) -> bool {
        self.current_hp <= self.stats.hp / 2
    }

    /// `current_hp > floor(max / 2)`.
    pub fn is_above_half(&self) -> bool {
        self.current_hp > self.stats.hp / 2
    }

    /// `current_hp > floor(max * 3 / 4)`.
    pub fn is_above_three_quarters(&self) -> bool {
        self.current_hp > self.stats.hp * 3 / 4
    }

    /// Weapon that can actually fight: staves and empty hands cannot.
    pub fn combat_weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref().filter(|w| !w.category.is_staff())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        let a = Position::new(2, 3);
        let b = Position::new(-1, 5);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(b.distance(&a), 5);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn hp_thresholds_use_floor() {
        let stats = UnitStats {
            hp: 21,
            ..UnitStats::default()
        };
        // floor(21 / 2) = 10
        let unit = CombatUnit::new(UnitId(1), "u", stats).with_hp(10);
        assert!(unit.is_below_half());
        assert!(!unit.is_above_half());

        // floor(21 * 3 / 4) = 15
        let unit = unit.with_hp(16);
        assert!(unit.is_above_three_quarters());
        assert_eq!(unit.missing_hp(), 5);
    }

    #[test]
    fn with_hp_clamps_to_max() {
        let stats = UnitStats {
            hp: 20,
            ..UnitStats::default()
        };
        let unit = CombatUnit::new(UnitId(1), "u", stats).with_hp(35);
        assert_eq!(unit.current_hp, 20);
    }
}
