//! Read-only data the engine consumes: weapons, accessories, terrain,
//! ability and affix tables, and the random source.
//!
//! Everything here is built once (usually by a loader) and borrowed by
//! combat calls. Free-text weapon specials are parsed into typed
//! [`Capability`] records at construction time.

pub mod ability;
pub mod accessory;
pub mod affix;
pub mod art;
pub mod capability;
pub mod rng;
pub mod terrain;
pub mod weapon;

pub use ability::{
    AbilityDef, AbilityEffects, AbilityId, AbilityTable, ActivationFormula, Condition,
    DamageCategory, DefendEffect, PhaseOverride, StrikeEffect, Trigger, TurnStartEffect,
};
pub use accessory::{Accessory, AccessoryEffects};
pub use affix::{AffixDef, AffixEffects, AffixId, AffixTable, AffixTrigger, DefendAffix, StatDebuff};
pub use art::{ArtUsage, WeaponArt};
pub use capability::{Capability, CapabilitySet};
pub use rng::{FixedRng, PcgRng, RngOracle, SequenceRng, compute_seed};
pub use terrain::Terrain;
pub use weapon::{StaffProfile, StaffRangeBonus, Weapon, WeaponCategory, WeaponRange};
