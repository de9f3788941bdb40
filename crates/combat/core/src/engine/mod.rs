//! Resolution engine and the precompute it shares with the forecast.
//!
//! # Architecture
//!
//! - `precompute`: [`Exchange`] inputs folded into an [`ExchangePlan`]
//! - `order`: phase ordering (normal, vantage, desperation)
//! - `hook`: per-strike trigger interpretation behind [`CombatHooks`]
//! - `resolve`: the strike loop
//! - `result`: events and final state handed back to the caller

pub mod hook;
pub mod order;
pub mod precompute;
pub mod resolve;
pub mod result;

pub use hook::{
    AffixRoll, CombatHooks, DefendRoll, NoHooks, PhaseRoll, StrikeContext, StrikeRoll, TableHooks,
};
pub use order::{Phase, PhaseOrder, Schedule};
pub use precompute::{Exchange, ExchangePlan, ModifierContext, SidePlan};
pub use resolve::resolve;
pub use result::{CombatEvent, CombatResult, PoisonEffect, Side, StrikeEvent};
