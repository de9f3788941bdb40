//! Combat balance simulator.
//!
//! Run with: `cargo run -p combat-sim -- <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use combat_sim::SimConfig;
use commands::{Fingerprint, ForecastCmd, Matchup, Matrix, Presets};
use tracing_subscriber::EnvFilter;

/// Combat balance simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Seeded combat simulations over unit presets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List unit presets in the catalog
    Presets(Presets),

    /// Show the RNG-free forecast for one pairing
    Forecast(ForecastCmd),

    /// Simulate one attacker against one defender
    Matchup(Matchup),

    /// Simulate every ordered pairing of the given presets
    Matrix(Matrix),

    /// Print the determinism fingerprint of a matrix run
    Fingerprint(Fingerprint),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SIM_TRIALS, SIM_SEED, SIM_DATA_DIR)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Presets(cmd) => cmd.execute(&config),
        Command::Forecast(cmd) => cmd.execute(&config),
        Command::Matchup(cmd) => cmd.execute(&config),
        Command::Matrix(cmd) => cmd.execute(&config),
        Command::Fingerprint(cmd) => cmd.execute(&config),
    }
}
