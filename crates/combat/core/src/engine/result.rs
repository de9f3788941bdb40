//! Output of one resolution call.

use crate::modifiers::Activation;
use crate::state::{BattleFlags, UnitId};

/// One of the two combatants in an exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Attacker => 0,
            Self::Defender => 1,
        }
    }
}

/// A single strike as it resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeEvent {
    pub striker: UnitId,
    pub target: UnitId,
    pub miss: bool,
    /// Final damage after every stage; 0 on a miss.
    pub damage: i32,
    pub crit: bool,
    pub target_hp_after: i32,
    /// HP restored to the striker by drain-class effects.
    pub heal: i32,
    pub striker_hp_after: i32,
    /// Bonus strike granted by an on-attack ability.
    pub extra_strike: bool,
    /// Damage reflected back onto the striker.
    pub reflected: i32,
    /// Tiles the target may warp after this strike; 0 when none.
    pub reposition: u32,
    pub activations: Vec<Activation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    Strike(StrikeEvent),
    /// Phase-level announcement (vantage, desperation, astra-class override).
    Ability { unit: UnitId, name: String },
}

impl CombatEvent {
    pub fn as_strike(&self) -> Option<&StrikeEvent> {
        match self {
            Self::Strike(strike) => Some(strike),
            Self::Ability { .. } => None,
        }
    }
}

/// Post-combat chip damage from a poison weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoisonEffect {
    pub target: Side,
    pub damage: i32,
}

/// Complete outcome of one exchange.
///
/// The caller applies `*_hp` and `*_flags` to its long-lived units; the
/// engine never mutates them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatResult {
    pub events: Vec<CombatEvent>,
    pub attacker_hp: i32,
    pub defender_hp: i32,
    pub attacker_died: bool,
    pub defender_died: bool,
    pub poison: Vec<PoisonEffect>,
    pub attacker_flags: BattleFlags,
    pub defender_flags: BattleFlags,
}

impl CombatResult {
    pub fn strikes(&self) -> impl Iterator<Item = &StrikeEvent> {
        self.events.iter().filter_map(CombatEvent::as_strike)
    }

    /// Total damage dealt by `unit` across all strikes.
    pub fn damage_dealt_by(&self, unit: UnitId) -> i32 {
        self.strikes()
            .filter(|s| s.striker == unit)
            .map(|s| s.damage)
            .sum()
    }

    pub fn hp(&self, side: Side) -> i32 {
        match side {
            Side::Attacker => self.attacker_hp,
            Side::Defender => self.defender_hp,
        }
    }
}
