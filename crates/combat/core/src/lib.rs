//! Deterministic tactical combat rules.
//!
//! `combat-core` resolves one attacker-versus-defender exchange at a time.
//! Callers fold every bonus into a [`ModifierSet`] per side with
//! [`modifiers::aggregate`], preview the exchange with [`forecast()`], and
//! commit it with [`resolve`], supplying the only source of randomness as an
//! [`RngOracle`]. The same seed, inputs and tables always produce the same
//! [`CombatResult`].
//!
//! Units are borrowed, never mutated. Lethal-save and first-hit bookkeeping
//! comes back on the result for the caller to store.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod forecast;
pub mod lifecycle;
pub mod modifiers;
pub mod state;
pub use combat::{
    Doubling, HealOutcome, Matchup, StaticCombatStats, TriangleBonus, attack_range, can_counter,
    static_combat_stats,
};
pub use config::{CombatConfig, TriangleTable};
pub use engine::{
    CombatEvent, CombatHooks, CombatResult, Exchange, ExchangePlan, ModifierContext, NoHooks,
    PhaseOrder, PoisonEffect, Side, StrikeEvent, TableHooks, resolve,
};
pub use env::{
    AbilityDef, AbilityTable, Accessory, AffixDef, AffixTable, PcgRng, RngOracle, Terrain, Weapon,
    WeaponArt, WeaponCategory, WeaponRange, compute_seed,
};
pub use error::{ArtDenied, RangeError, TableError};
pub use forecast::{Forecast, SidePreview, Warning, forecast};
pub use lifecycle::{
    AreaDamage, AttackAffixEffects, HealEffect, attack_affix_effects, death_effects,
    turn_start_effects,
};
pub use modifiers::{Activation, CombatFlags, CombatScene, ModifierSet, aggregate, art_modifiers};
pub use state::{BattleFlags, CombatUnit, Faction, MoveType, Position, Stat, UnitId, UnitStats, WeaponRank};
