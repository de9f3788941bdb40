//! Error types for building combat data.
//!
//! Nothing on a combat path returns these: forecast and resolution degrade
//! malformed input to "no effect". Errors only surface while tables and
//! weapons are being constructed from raw data.

/// Failure while assembling an ability or affix table.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} `{id}` has an empty name")]
    MissingName { kind: &'static str, id: String },
}

/// Failure while parsing a weapon range string such as `"1-2"`.
///
/// [`crate::env::WeaponRange::parse`] falls back to melee range instead of
/// surfacing this; [`crate::env::WeaponRange::try_parse`] exposes it for
/// loaders that want to warn about bad rows.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("empty range string")]
    Empty,

    #[error("invalid range bound `{0}`")]
    InvalidBound(String),

    #[error("range minimum {min} exceeds maximum {max}")]
    Inverted { min: u32, max: u32 },
}

/// Reason a weapon art cannot be used right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArtDenied {
    #[error("no weapon equipped")]
    NoWeapon,

    #[error("art requires a different weapon category")]
    WrongWeaponCategory,

    #[error("weapon rank too low for this art")]
    InsufficientRank,

    #[error("art can only be used when initiating combat")]
    InitiationOnly,

    #[error("not enough HP to pay the art's cost")]
    InsufficientHp,

    #[error("per-map usage limit reached")]
    PerMapLimit,

    #[error("per-turn usage limit reached")]
    PerTurnLimit,
}
