/// Core stat identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Stat {
    Hp,
    Str,
    Mag,
    Skl,
    Spd,
    Lck,
    Def,
    Res,
}

/// Base stat block of a combatant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitStats {
    pub hp: i32,
    pub strength: i32,
    pub magic: i32,
    pub skill: i32,
    pub speed: i32,
    pub luck: i32,
    pub defense: i32,
    pub resistance: i32,
}

impl UnitStats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Str => self.strength,
            Stat::Mag => self.magic,
            Stat::Skl => self.skill,
            Stat::Spd => self.speed,
            Stat::Lck => self.luck,
            Stat::Def => self.defense,
            Stat::Res => self.resistance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn stat_names_parse_case_insensitively() {
        assert_eq!("str".parse::<Stat>(), Ok(Stat::Str));
        assert_eq!("RES".parse::<Stat>(), Ok(Stat::Res));
        assert_eq!(Stat::Lck.to_string(), "LCK");
        assert!("AGI".parse::<Stat>().is_err());
    }

    #[test]
    fn get_reads_every_stat() {
        let stats = UnitStats {
            hp: 1,
            strength: 2,
            magic: 3,
            skill: 4,
            speed: 5,
            luck: 6,
            defense: 7,
            resistance: 8,
        };
        let values: Vec<i32> = Stat::iter().map(|s| stats.get(s)).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }
}
