/// Read-only bonuses of the tile a combatant stands on.
///
/// Callers pass `None` for tiles without data; every lookup then reads as
/// zero bonuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Terrain {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub avoid_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub def_bonus: i32,
}

impl Terrain {
    pub fn new(name: impl Into<String>, avoid_bonus: i32, def_bonus: i32) -> Self {
        Self {
            name: name.into(),
            avoid_bonus,
            def_bonus,
        }
    }

    pub fn avoid_of(terrain: Option<&Terrain>) -> i32 {
        terrain.map_or(0, |t| t.avoid_bonus)
    }

    pub fn def_of(terrain: Option<&Terrain>) -> i32 {
        terrain.map_or(0, |t| t.def_bonus)
    }

    pub fn name_of(terrain: Option<&Terrain>) -> Option<&str> {
        terrain.map(|t| t.name.as_str())
    }
}
