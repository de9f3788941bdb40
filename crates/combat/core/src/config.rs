use crate::combat::TriangleBonus;

/// Combat balance constants and tunable parameters.
///
/// Every formula in the engine reads its constants from here, so a balance
/// pass only ever touches `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Speed lead required to strike twice in one exchange.
    pub double_threshold: i32,
    /// Damage multiplier applied by a critical hit.
    pub crit_multiplier: i32,
    /// Multiplier applied by any bow against a flying unit.
    pub bow_vs_flying: i32,
    /// Upper bound when weapon- and ability-sourced effectiveness stack.
    pub effectiveness_cap: i32,
    /// Weapon triangle magnitudes per mastery rank.
    pub triangle: TriangleTable,
    /// MAG values at which a staff gains one extra use.
    pub staff_bonus_use_thresholds: Vec<i32>,
}

impl CombatConfig {
    // ===== compile-time constants =====
    /// Strike phases per exchange (two per side).
    pub const MAX_PHASES: usize = 4;
    /// Upper bound on strikes a single phase may schedule (brave or override).
    pub const MAX_PHASE_STRIKES: u32 = 8;
    /// Range sentinel used for "ALL" range weapons.
    pub const RANGE_ALL: u32 = 99;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DOUBLE_THRESHOLD: i32 = 5;
    pub const DEFAULT_CRIT_MULTIPLIER: i32 = 3;
    pub const DEFAULT_BOW_VS_FLYING: i32 = 3;
    pub const DEFAULT_EFFECTIVENESS_CAP: i32 = 5;
    pub const DEFAULT_STAFF_BONUS_USE_THRESHOLDS: [i32; 3] = [8, 14, 20];

    pub fn new() -> Self {
        Self {
            double_threshold: Self::DEFAULT_DOUBLE_THRESHOLD,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            bow_vs_flying: Self::DEFAULT_BOW_VS_FLYING,
            effectiveness_cap: Self::DEFAULT_EFFECTIVENESS_CAP,
            triangle: TriangleTable::default(),
            staff_bonus_use_thresholds: Self::DEFAULT_STAFF_BONUS_USE_THRESHOLDS.to_vec(),
        }
    }

    pub fn with_double_threshold(mut self, double_threshold: i32) -> Self {
        self.double_threshold = double_threshold;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hit/damage adjustments for each triangle matchup and mastery rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TriangleTable {
    pub advantage: TriangleBonus,
    pub disadvantage: TriangleBonus,
    pub mastery_advantage: TriangleBonus,
    pub mastery_disadvantage: TriangleBonus,
}

impl Default for TriangleTable {
    fn default() -> Self {
        Self {
            advantage: TriangleBonus::new(10, 1),
            disadvantage: TriangleBonus::new(-10, -1),
            mastery_advantage: TriangleBonus::new(15, 2),
            mastery_disadvantage: TriangleBonus::new(-5, -1),
        }
    }
}
