//! Monte-Carlo balance harness for the combat engine.
//!
//! Loads a content catalog, runs seeded duels between unit presets, and
//! summarizes kill rates and damage. Results are reproducible: the same
//! data, base seed and trial count always yield the same fingerprint.

pub mod config;
pub mod matchup;
pub mod report;

pub use config::SimConfig;
pub use matchup::{Duel, MatchupStats, forecast_duel, run_matchup, run_matrix};
pub use report::{fingerprint, format_row, header};

use combat_content::{Catalog, ContentFactory};

/// Loads the catalog named by `config`, or the bundled one.
pub fn load_catalog(config: &SimConfig) -> anyhow::Result<Catalog> {
    let factory = match &config.data_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    factory.load_catalog()
}
