//! Simulate every ordered pairing.

use anyhow::Result;
use clap::Parser;
use combat_sim::{SimConfig, format_row, header, load_catalog, run_matrix};

use super::BatchArgs;

/// Simulate every ordered pairing of the given presets
#[derive(Parser)]
pub struct Matrix {
    /// Presets to pair up (defaults to every preset in the catalog)
    #[arg(value_name = "PRESET")]
    presets: Vec<String>,

    #[command(flatten)]
    batch: BatchArgs,
}

impl Matrix {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let config = self.batch.apply(config);
        let catalog = load_catalog(&config)?;
        let names = if self.presets.is_empty() {
            catalog.units.iter().map(|p| p.name.clone()).collect()
        } else {
            self.presets
        };

        tracing::info!(
            presets = names.len(),
            trials = config.trials,
            seed = config.base_seed,
            "running matrix"
        );
        let rows = run_matrix(&catalog, &names, config.trials, config.base_seed)?;

        println!("{}", header());
        for row in &rows {
            println!("{}", format_row(row));
        }
        Ok(())
    }
}
