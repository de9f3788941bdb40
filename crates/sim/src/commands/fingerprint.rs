//! Determinism fingerprint of a matrix run.

use anyhow::Result;
use clap::Parser;
use combat_sim::{SimConfig, fingerprint, load_catalog, run_matrix};

use super::BatchArgs;

/// Print the determinism fingerprint of a matrix run
#[derive(Parser)]
pub struct Fingerprint {
    /// Presets to pair up (defaults to every preset in the catalog)
    #[arg(value_name = "PRESET")]
    presets: Vec<String>,

    /// Fail unless the fingerprint equals this hex digest
    #[arg(long, value_name = "HEX")]
    expect: Option<String>,

    #[command(flatten)]
    batch: BatchArgs,
}

impl Fingerprint {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let config = self.batch.apply(config);
        let catalog = load_catalog(&config)?;
        let names = if self.presets.is_empty() {
            catalog.units.iter().map(|p| p.name.clone()).collect()
        } else {
            self.presets
        };

        let rows = run_matrix(&catalog, &names, config.trials, config.base_seed)?;
        let digest = fingerprint(&rows)?;
        println!("{digest}");

        if let Some(expected) = self.expect {
            if !expected.eq_ignore_ascii_case(&digest) {
                anyhow::bail!("Fingerprint mismatch: expected {}, got {}", expected, digest);
            }
        }
        Ok(())
    }
}
