//! Stat calculator.
//!
//! Pure arithmetic shared by the forecast and the resolution engine. No
//! function here draws randomness or reads anything beyond its arguments.
//!
//! # Core Functions
//!
//! - `effective_speed` / `Doubling`: attack speed and follow-up eligibility
//! - `attack_power` / `defense_against` / `base_damage`: damage pipeline
//! - `hit_rate` / `crit_rate` / `avoid`: percentages, clamped to 0..=100
//! - `triangle_bonus`: weapon triangle with mastery, reaver and ignore rules
//! - `combined_effectiveness`: weapon and ability multipliers

pub mod damage;
pub mod effectiveness;
pub mod heal;
pub mod hit;
pub mod profile;
pub mod range;
pub mod speed;
pub mod triangle;

pub use damage::{apply_damage, attack_power, base_damage, defending_stat, defense_against};
pub use effectiveness::{combined_effectiveness, weapon_effectiveness};
pub use heal::{
    HealOutcome, bonus_uses, effective_staff_range, heal_amount, remaining_uses, resolve_heal,
    staff_max_uses,
};
pub use hit::{avoid, clamp_percent, crit_rate, hit_rate};
pub use profile::{StaticCombatStats, static_combat_stats};
pub use range::{attack_range, can_counter};
pub use speed::{Doubling, effective_speed, effective_weight};
pub use triangle::{Matchup, TriangleBonus, matchup, triangle_bonus};
