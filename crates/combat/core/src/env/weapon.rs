//! Weapon definitions.

use crate::config::CombatConfig;
use crate::env::{AbilityId, Capability, CapabilitySet};
use crate::error::RangeError;
use crate::state::Stat;

/// Weapon family.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum WeaponCategory {
    Sword,
    Lance,
    Axe,
    Bow,
    Tome,
    Light,
    Staff,
}

impl WeaponCategory {
    pub fn is_physical(self) -> bool {
        matches!(self, Self::Sword | Self::Lance | Self::Axe | Self::Bow)
    }

    pub fn is_magical(self) -> bool {
        matches!(self, Self::Tome | Self::Light)
    }

    pub fn is_staff(self) -> bool {
        self == Self::Staff
    }

    /// Member of the Sword/Lance/Axe triangle.
    pub fn in_triangle(self) -> bool {
        matches!(self, Self::Sword | Self::Lance | Self::Axe)
    }

    /// The category this one has triangle advantage over.
    ///
    /// Sword → Axe → Lance → Sword.
    pub fn beats(self) -> Option<Self> {
        match self {
            Self::Sword => Some(Self::Axe),
            Self::Axe => Some(Self::Lance),
            Self::Lance => Some(Self::Sword),
            _ => None,
        }
    }
}

/// Inclusive attack range in grid tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponRange {
    pub min: u32,
    pub max: u32,
}

impl WeaponRange {
    pub const MELEE: Self = Self { min: 1, max: 1 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Parses `"1"`, `"1-2"` or `"1-ALL"`.
    ///
    /// Anything unparsable falls back to melee range.
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or(Self::MELEE)
    }

    pub fn try_parse(text: &str) -> Result<Self, RangeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RangeError::Empty);
        }
        let (min, max) = match text.split_once('-') {
            Some((lo, hi)) => (parse_bound(lo)?, parse_bound(hi)?),
            None => {
                let value = parse_bound(text)?;
                (value, value)
            }
        };
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, distance: u32) -> bool {
        (self.min..=self.max).contains(&distance)
    }

    /// Extends the far bound by `bonus` tiles (negative values shrink it, never
    /// below the near bound).
    #[must_use]
    pub fn extended(self, bonus: i32) -> Self {
        let max = (self.max as i64 + i64::from(bonus)).max(i64::from(self.min));
        Self {
            min: self.min,
            max: max.min(i64::from(u32::MAX)) as u32,
        }
    }
}

impl Default for WeaponRange {
    fn default() -> Self {
        Self::MELEE
    }
}

fn parse_bound(text: &str) -> Result<u32, RangeError> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("all") {
        return Ok(CombatConfig::RANGE_ALL);
    }
    text.parse()
        .map_err(|_| RangeError::InvalidBound(text.to_string()))
}

/// Extra range a staff gains once the healer's MAG reaches a threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaffRangeBonus {
    pub magic: i32,
    pub bonus: u32,
}

/// Healing fields carried only by staves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StaffProfile {
    pub heal_base: i32,
    pub uses: u32,
    pub range_bonuses: Vec<StaffRangeBonus>,
}

/// An equipped weapon with its capabilities already parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub category: WeaponCategory,
    pub might: i32,
    pub hit: i32,
    pub crit: i32,
    pub weight: i32,
    pub range: WeaponRange,
    pub capabilities: CapabilitySet,
    pub staff: Option<StaffProfile>,
    /// Abilities the wielder gains while this weapon is equipped.
    pub granted_abilities: Vec<AbilityId>,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        category: WeaponCategory,
        might: i32,
        hit: i32,
        crit: i32,
        weight: i32,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            might,
            hit,
            crit,
            weight,
            range: WeaponRange::MELEE,
            capabilities: CapabilitySet::default(),
            staff: None,
            granted_abilities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_range(mut self, range: WeaponRange) -> Self {
        self.range = range;
        self
    }

    /// Parses `special` and replaces the capability record.
    #[must_use]
    pub fn with_special(mut self, special: &str) -> Self {
        self.capabilities = CapabilitySet::parse(special);
        self
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities = capabilities.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_staff(mut self, staff: StaffProfile) -> Self {
        self.staff = Some(staff);
        self
    }

    #[must_use]
    pub fn with_granted_abilities<I, S>(mut self, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<AbilityId>,
    {
        self.granted_abilities = abilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_physical(&self) -> bool {
        self.category.is_physical()
    }

    /// Deals MAG-based damage against RES: tomes, light magic and magic swords.
    pub fn uses_magic(&self) -> bool {
        self.category.is_magical() || self.capabilities.is_magic_sword()
    }

    /// Stat that powers this weapon's attack.
    pub fn attack_stat(&self) -> Stat {
        if self.uses_magic() { Stat::Mag } else { Stat::Str }
    }

    /// Strikes per strike slot.
    pub fn strikes_per_slot(&self) -> u32 {
        if self.capabilities.is_brave() { 2 } else { 1 }
    }
}
