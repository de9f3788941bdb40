//! Output helpers: text tables and determinism fingerprints.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::matchup::MatchupStats;

/// SHA-256 over the bincode encoding of `stats`, hex encoded.
///
/// Two runs with the same content, seed and trial count print the same
/// fingerprint; any rules change that moves a single roll changes it.
pub fn fingerprint(stats: &[MatchupStats]) -> Result<String> {
    let bytes = bincode::serialize(stats).context("Failed to encode matchup stats")?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Column header matching [`format_row`].
pub fn header() -> String {
    format!(
        "{:<18} {:<18} {:>6} {:>6} {:>8} {:>8} {:>7}",
        "attacker", "defender", "kill%", "death%", "dealt", "taken", "double"
    )
}

pub fn format_row(stats: &MatchupStats) -> String {
    format!(
        "{:<18} {:<18} {:>6.1} {:>6.1} {:>8.2} {:>8.2} {:>7}",
        stats.attacker,
        stats.defender,
        stats.kill_rate() * 100.0,
        stats.death_rate() * 100.0,
        stats.avg_damage_dealt(),
        stats.avg_damage_taken(),
        if stats.doubles() { "yes" } else { "no" },
    )
}
