use crate::env::Condition;

/// Combat-relevant effects of an equipped accessory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AccessoryEffects {
    /// Numeric bonuses apply only while this holds.
    pub condition: Option<Condition>,
    pub hit_bonus: i32,
    pub avoid_bonus: i32,
    pub crit_bonus: i32,
    pub atk_bonus: i32,
    pub def_bonus: i32,
    pub res_bonus: i32,
    pub spd_bonus: i32,
    /// Incoming effectiveness multipliers collapse to 1x.
    pub negate_effectiveness: bool,
    /// Lowers the wearer's doubling threshold.
    pub double_threshold_reduction: i32,
    /// The opponent can never double the wearer.
    pub prevent_enemy_double: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accessory {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combat: AccessoryEffects,
}

impl Accessory {
    pub fn new(name: impl Into<String>, combat: AccessoryEffects) -> Self {
        Self {
            name: name.into(),
            combat,
        }
    }
}
