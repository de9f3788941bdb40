//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Batch settings shared by every subcommand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Trials per matchup.
    pub trials: u32,
    /// Base seed; every trial derives its own stream from it.
    pub base_seed: u64,
    /// Content directory; `None` uses the bundled data set.
    pub data_dir: Option<PathBuf>,
}

impl SimConfig {
    pub const DEFAULT_TRIALS: u32 = 1000;
    pub const DEFAULT_SEED: u64 = 0x5eed_c0de;

    /// Construct simulation configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TRIALS` - Trials per matchup (default: 1000, at least 1)
    /// - `SIM_SEED` - Base seed (default: 0x5eedc0de)
    /// - `SIM_DATA_DIR` - Content directory (default: bundled data)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(trials) = read_env::<u32>("SIM_TRIALS") {
            config.trials = trials.max(1);
        }
        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.base_seed = seed;
        }
        if let Some(dir) = read_env::<PathBuf>("SIM_DATA_DIR") {
            config.data_dir = Some(dir);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: Self::DEFAULT_TRIALS,
            base_seed: Self::DEFAULT_SEED,
            data_dir: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
