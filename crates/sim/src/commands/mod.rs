//! Subcommands.

mod fingerprint;
mod forecast;
mod matchup;
mod matrix;
mod presets;

pub use fingerprint::Fingerprint;
pub use forecast::ForecastCmd;
pub use matchup::Matchup;
pub use matrix::Matrix;
pub use presets::Presets;

use std::path::PathBuf;

use combat_sim::SimConfig;

/// Overrides for the environment-derived batch settings.
#[derive(clap::Args, Clone, Debug, Default)]
pub struct BatchArgs {
    /// Trials per pairing (overrides SIM_TRIALS)
    #[arg(short, long, value_name = "N")]
    trials: Option<u32>,

    /// Base seed (overrides SIM_SEED)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Content directory (overrides SIM_DATA_DIR)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl BatchArgs {
    pub fn apply(&self, config: &SimConfig) -> SimConfig {
        let mut config = config.clone();
        if let Some(trials) = self.trials {
            config.trials = trials.max(1);
        }
        if let Some(seed) = self.seed {
            config.base_seed = seed;
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        config
    }
}
