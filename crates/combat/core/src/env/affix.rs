//! Affix table: random modifiers rolled onto enemy units.
//!
//! Affixes mirror abilities with a smaller effect vocabulary.

use std::collections::BTreeMap;

use crate::env::Condition;
use crate::error::TableError;
use crate::state::Stat;

pub type AffixId = String;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AffixTrigger {
    Passive,
    PassiveAura,
    OnCombatStart,
    OnAttack,
    OnDefend,
    OnTurnStart,
    OnDeath,
}

/// Stat reduction an on-attack affix inflicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDebuff {
    pub stat: Stat,
    pub value: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AffixEffects {
    pub atk_bonus: i32,
    /// Negative values model armor-breaking penalties.
    pub def_bonus: i32,
    pub res_bonus: i32,
    pub hit_bonus: i32,
    pub avoid_bonus: i32,
    pub mov_bonus: i32,
    /// Extra DEF while standing on the named terrain.
    pub terrain_def_bonus: BTreeMap<String, i32>,
    pub immune_to_displacement: bool,
    /// On-attack: chip damage applied by the caller after combat.
    pub poison_damage: i32,
    pub debuff: Option<StatDebuff>,
    /// On-turn-start: heal by this percent of max HP.
    pub heal_self_percent: i32,
    /// On-death: damage dealt to every unit within `range`.
    pub aoe_damage: i32,
}

/// Reaction of an on-defend affix to a landed strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefendAffix {
    /// The first landed hit of the phase deals 0.
    NegateFirstHit,
    /// Reflects `percent` of melee damage back to the striker.
    ReflectMelee { percent: i32 },
    /// After taking damage, the owner may warp up to `range` tiles.
    Reposition { range: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffixDef {
    pub id: AffixId,
    pub name: String,
    pub trigger: AffixTrigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition: Option<Condition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: AffixEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defend: Option<DefendAffix>,
}

impl AffixDef {
    pub fn new(id: impl Into<AffixId>, name: impl Into<String>, trigger: AffixTrigger) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger,
            condition: None,
            range: 0,
            effects: AffixEffects::default(),
            defend: None,
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: AffixEffects) -> Self {
        self.effects = effects;
        self
    }

    #[must_use]
    pub fn with_defend(mut self, defend: DefendAffix) -> Self {
        self.defend = Some(defend);
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AffixTable {
    entries: BTreeMap<AffixId, AffixDef>,
}

impl AffixTable {
    pub fn new(defs: impl IntoIterator<Item = AffixDef>) -> Result<Self, TableError> {
        let mut entries = BTreeMap::new();
        for def in defs {
            if def.name.trim().is_empty() {
                return Err(TableError::MissingName {
                    kind: "affix",
                    id: def.id,
                });
            }
            if entries.contains_key(&def.id) {
                return Err(TableError::DuplicateId {
                    kind: "affix",
                    id: def.id,
                });
            }
            entries.insert(def.id.clone(), def);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, id: &str) -> Option<&AffixDef> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AffixDef> {
        self.entries.values()
    }

    /// Resolves `ids` in order, skipping unknown ids and repeats.
    pub fn resolve<'a, I>(&'a self, ids: I) -> impl Iterator<Item = &'a AffixDef> + 'a
    where
        I: IntoIterator<Item = &'a AffixId>,
        I::IntoIter: 'a,
    {
        let mut seen: Vec<&'a str> = Vec::new();
        ids.into_iter().filter_map(move |id| {
            if seen.contains(&id.as_str()) {
                return None;
            }
            seen.push(id.as_str());
            self.get(id)
        })
    }
}
