//! Typed weapon capabilities.
//!
//! Raw weapon rows describe their special effects in one free-text field
//! (`"Effective vs Armored (3x). +5 DEF when equipped"`). That text is parsed
//! exactly once, when the weapon is built, into a [`CapabilitySet`]; combat
//! code only ever queries the typed record.

use core::str::FromStr;

use crate::state::{MoveType, Stat};

/// One special effect carried by a weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Inverts the weapon triangle for this weapon.
    Reaver,
    /// Might is multiplied against units of the given movement type.
    Effective { move_type: MoveType, multiplier: i32 },
    /// Flat stat bonus while equipped.
    StatBonus { stat: Stat, value: i32 },
    /// Heals the wielder by damage dealt.
    Drain,
    /// Post-combat chip damage that cannot kill.
    Poison { amount: i32 },
    /// Every strike slot becomes two immediate strikes.
    Brave,
    /// Negative triangle results clamp to zero.
    TriangleIgnore,
    /// Halves the target's DEF.
    Sunder,
    /// Physical weapon that deals MAG-based damage against RES.
    MagicSword,
    /// Stat bonus applied only while counterattacking.
    CounterBonus { stat: Stat, value: i32 },
}

/// Parsed capability record of one weapon.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CapabilitySet(Vec<Capability>);

impl CapabilitySet {
    pub fn new(capabilities: Vec<Capability>) -> Self {
        Self(capabilities)
    }

    /// Parses a weapon's free-text special field.
    ///
    /// Unrecognised text is ignored, so a typo degrades to "no effect".
    pub fn parse(special: &str) -> Self {
        let text = special.to_ascii_lowercase();
        let mut caps = Vec::new();

        if text.contains("reverses weapon triangle") {
            caps.push(Capability::Reaver);
        }
        for (at, pattern) in text.match_indices("effective vs ") {
            if let Some(cap) = parse_effective(&text[at + pattern.len()..]) {
                caps.push(cap);
            }
        }
        for segment in text.split(['.', ';']) {
            if segment.contains("when equipped") {
                caps.extend(
                    scan_bonuses(segment).map(|(stat, value)| Capability::StatBonus { stat, value }),
                );
            } else if segment.contains("when counterattacking") {
                caps.extend(
                    scan_bonuses(segment)
                        .map(|(stat, value)| Capability::CounterBonus { stat, value }),
                );
            }
        }
        if text.contains("drains hp") {
            caps.push(Capability::Drain);
        }
        if let Some(at) = text.find("poison: target loses ") {
            let rest = &text[at + "poison: target loses ".len()..];
            if let Some((amount, tail)) = take_number(rest) {
                if tail.trim_start().starts_with("hp") {
                    caps.push(Capability::Poison { amount });
                }
            }
        }
        if text.contains("twice consecutively") {
            caps.push(Capability::Brave);
        }
        if text.contains("ignores weapon triangle disadvantage") {
            caps.push(Capability::TriangleIgnore);
        }
        if text.contains("halves target def") {
            caps.push(Capability::Sunder);
        }
        if text.contains("magic sword") {
            caps.push(Capability::MagicSword);
        }

        Self(caps)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_reaver(&self) -> bool {
        self.has(Capability::Reaver)
    }

    pub fn is_brave(&self) -> bool {
        self.has(Capability::Brave)
    }

    pub fn drains(&self) -> bool {
        self.has(Capability::Drain)
    }

    pub fn ignores_triangle(&self) -> bool {
        self.has(Capability::TriangleIgnore)
    }

    pub fn sunders(&self) -> bool {
        self.has(Capability::Sunder)
    }

    pub fn is_magic_sword(&self) -> bool {
        self.has(Capability::MagicSword)
    }

    /// Total poison applied after combat.
    pub fn poison(&self) -> i32 {
        self.0
            .iter()
            .map(|c| match c {
                Capability::Poison { amount } => *amount,
                _ => 0,
            })
            .sum()
    }

    /// Multiplier against `move_type`, if the weapon names it.
    pub fn effective_against(&self, move_type: MoveType) -> Option<i32> {
        self.0
            .iter()
            .filter_map(|c| match c {
                Capability::Effective {
                    move_type: target,
                    multiplier,
                } if *target == move_type => Some(*multiplier),
                _ => None,
            })
            .max()
    }

    /// Sum of "when equipped" bonuses to `stat`.
    pub fn stat_bonus(&self, stat: Stat) -> i32 {
        self.0
            .iter()
            .map(|c| match c {
                Capability::StatBonus { stat: s, value } if *s == stat => *value,
                _ => 0,
            })
            .sum()
    }

    /// Sum of counterattack-only bonuses to `stat`.
    pub fn counter_bonus(&self, stat: Stat) -> i32 {
        self.0
            .iter()
            .map(|c| match c {
                Capability::CounterBonus { stat: s, value } if *s == stat => *value,
                _ => 0,
            })
            .sum()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `"armored (3x)..."` → `Effective { Armored, 3 }`
fn parse_effective(rest: &str) -> Option<Capability> {
    let word = take_word(rest);
    let move_type = MoveType::from_str(word).ok()?;
    let rest = rest[word.len()..].trim_start().strip_prefix('(')?;
    let (multiplier, rest) = take_number(rest)?;
    rest.starts_with('x').then_some(Capability::Effective {
        move_type,
        multiplier,
    })
}

/// Every `+N STAT` pair in `segment`, skipping HP.
fn scan_bonuses(segment: &str) -> impl Iterator<Item = (Stat, i32)> + '_ {
    segment.match_indices('+').filter_map(|(at, _)| {
        let (value, rest) = take_number(&segment[at + 1..])?;
        let stat = Stat::from_str(take_word(rest.trim_start())).ok()?;
        (stat != Stat::Hp).then_some((stat, value))
    })
}

fn take_number(s: &str) -> Option<(i32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

fn take_word(s: &str) -> &str {
    let end = s
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(s.len());
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_effectiveness_and_bonuses() {
        let caps = CapabilitySet::parse("Effective vs Armored (3x). +5 DEF, +5 RES when equipped");
        assert_eq!(caps.effective_against(MoveType::Armored), Some(3));
        assert_eq!(caps.effective_against(MoveType::Flying), None);
        assert_eq!(caps.stat_bonus(Stat::Def), 5);
        assert_eq!(caps.stat_bonus(Stat::Res), 5);
        assert_eq!(caps.stat_bonus(Stat::Spd), 0);
    }

    #[test]
    fn parses_flags() {
        let caps = CapabilitySet::parse(
            "Strikes twice consecutively. Drains HP. Halves target DEF. Reverses weapon triangle",
        );
        assert!(caps.is_brave());
        assert!(caps.drains());
        assert!(caps.sunders());
        assert!(caps.is_reaver());
        assert!(!caps.ignores_triangle());
        assert!(!caps.is_magic_sword());
    }

    #[test]
    fn parses_poison_and_counter_bonus() {
        let caps = CapabilitySet::parse(
            "Poison: target loses 5 HP after combat. +5 STR when counterattacking",
        );
        assert_eq!(caps.poison(), 5);
        assert_eq!(caps.counter_bonus(Stat::Str), 5);
        // counterattack bonuses are not "when equipped" bonuses
        assert_eq!(caps.stat_bonus(Stat::Str), 0);
    }

    #[test]
    fn parses_magic_sword_and_triangle_ignore() {
        let caps = CapabilitySet::parse("Magic sword. Ignores weapon triangle disadvantage");
        assert!(caps.is_magic_sword());
        assert!(caps.ignores_triangle());
    }

    #[test]
    fn garbage_text_is_no_effect() {
        assert!(CapabilitySet::parse("").is_empty());
        assert!(CapabilitySet::parse("Effective vs Dragons (big)").is_empty());
        assert!(CapabilitySet::parse("+X SPD when equipped").is_empty());
        assert!(CapabilitySet::parse("+3 HP when equipped").is_empty());
    }
}
