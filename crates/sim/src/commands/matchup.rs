//! Simulate one pairing.

use anyhow::Result;
use clap::Parser;
use combat_sim::{Duel, SimConfig, format_row, header, load_catalog, run_matchup};

use super::BatchArgs;

/// Simulate one attacker against one defender
#[derive(Parser)]
pub struct Matchup {
    /// Attacking preset
    #[arg(value_name = "ATTACKER")]
    attacker: String,

    /// Defending preset
    #[arg(value_name = "DEFENDER")]
    defender: String,

    /// Terrain under the defender
    #[arg(long, value_name = "TERRAIN")]
    terrain: Option<String>,

    /// Weapon art the attacker uses every trial
    #[arg(long, value_name = "ART")]
    art: Option<String>,

    #[command(flatten)]
    batch: BatchArgs,
}

impl Matchup {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let config = self.batch.apply(config);
        let catalog = load_catalog(&config)?;
        let duel = Duel {
            attacker: self.attacker,
            defender: self.defender,
            defender_terrain: self.terrain,
            art: self.art,
            distance: None,
        };

        tracing::info!(trials = config.trials, seed = config.base_seed, "running matchup");
        let stats = run_matchup(&catalog, &duel, config.trials, config.base_seed, 0)?;

        println!("{}", header());
        println!("{}", format_row(&stats));
        Ok(())
    }
}
