//! Weapon arts: one-shot techniques that trade doubling for a burst of
//! combat modifiers.

use std::collections::BTreeMap;

use crate::env::{AbilityEffects, WeaponCategory};
use crate::error::ArtDenied;
use crate::state::{CombatUnit, WeaponRank};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponArt {
    pub id: String,
    pub name: String,
    pub category: WeaponCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub required_rank: WeaponRank,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiation_only: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_cost: i32,
    /// 0 means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_map_limit: u32,
    /// 0 means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_turn_limit: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: AbilityEffects,
}

impl WeaponArt {
    /// Checks whether `unit` may use this art now.
    ///
    /// # Arguments
    ///
    /// * `usage` - Caller-owned usage counters for this unit
    /// * `is_initiating` - Whether the unit is starting the exchange
    /// * `turn` - Current turn number, if the caller tracks one
    pub fn check(
        &self,
        unit: &CombatUnit,
        usage: &ArtUsage,
        is_initiating: bool,
        turn: Option<u32>,
    ) -> Result<(), ArtDenied> {
        let weapon = unit.weapon.as_ref().ok_or(ArtDenied::NoWeapon)?;
        if weapon.category != self.category {
            return Err(ArtDenied::WrongWeaponCategory);
        }
        if unit.weapon_rank < self.required_rank {
            return Err(ArtDenied::InsufficientRank);
        }
        if self.initiation_only && !is_initiating {
            return Err(ArtDenied::InitiationOnly);
        }
        if self.hp_cost > 0 && unit.current_hp <= self.hp_cost {
            return Err(ArtDenied::InsufficientHp);
        }
        if self.per_map_limit > 0 && usage.map_count(&self.id) >= self.per_map_limit {
            return Err(ArtDenied::PerMapLimit);
        }
        if let Some(turn) = turn {
            if self.per_turn_limit > 0 && usage.turn_count(&self.id, turn) >= self.per_turn_limit {
                return Err(ArtDenied::PerTurnLimit);
            }
        }
        Ok(())
    }

    /// HP after paying the art's cost; the cost alone never kills.
    pub fn hp_after_cost(&self, current_hp: i32) -> i32 {
        if self.hp_cost <= 0 {
            return current_hp;
        }
        (current_hp - self.hp_cost).max(1)
    }
}

/// Per-unit weapon art usage, owned by the caller for one map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArtUsage {
    per_map: BTreeMap<String, u32>,
    turn: Option<u32>,
    per_turn: BTreeMap<String, u32>,
}

impl ArtUsage {
    pub fn map_count(&self, art_id: &str) -> u32 {
        self.per_map.get(art_id).copied().unwrap_or(0)
    }

    /// Uses recorded during `turn`; counts from other turns read as 0.
    pub fn turn_count(&self, art_id: &str, turn: u32) -> u32 {
        if self.turn != Some(turn) {
            return 0;
        }
        self.per_turn.get(art_id).copied().unwrap_or(0)
    }

    pub fn record(&mut self, art_id: &str, turn: Option<u32>) {
        *self.per_map.entry(art_id.to_string()).or_insert(0) += 1;
        if let Some(turn) = turn {
            if self.turn != Some(turn) {
                self.per_turn.clear();
                self.turn = Some(turn);
            }
            *self.per_turn.entry(art_id.to_string()).or_insert(0) += 1;
        }
    }

    pub fn reset_turn(&mut self, turn: Option<u32>) {
        self.per_turn.clear();
        self.turn = turn;
    }
}
