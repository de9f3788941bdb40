//! Caller-owned combatant state.
//!
//! Units are borrowed for the duration of one forecast or resolution call.
//! The engine never mutates them; per-battle bookkeeping such as a consumed
//! lethal save is handed back on [`crate::engine::CombatResult`] for the
//! caller to apply.

pub mod stats;
pub mod unit;

pub use stats::{Stat, UnitStats};
pub use unit::{BattleFlags, CombatUnit, Faction, MoveType, Position, UnitId, WeaponRank};
