//! Modifier aggregator.
//!
//! Collects every bonus that applies to one combatant for one exchange into a
//! normalized [`ModifierSet`]. Sources are abilities, affixes, accessories and
//! weapon arts; [`ModifierSet::merge`] is the only way sets are combined.

pub mod affix;
pub mod aggregate;
pub mod art;
pub mod set;

pub use affix::AffixModifiers;
pub use aggregate::{CombatScene, aggregate, effects_modifiers};
pub use art::art_modifiers;
pub use set::{
    Activation, ActivationSource, CombatFlags, Effectiveness, ModifierSet, RangeOverride,
    StatScaling,
};
