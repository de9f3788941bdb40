//! List unit presets.

use anyhow::Result;
use clap::Parser;
use combat_sim::{SimConfig, load_catalog};

use super::BatchArgs;

/// List unit presets in the catalog
#[derive(Parser)]
pub struct Presets {
    #[command(flatten)]
    batch: BatchArgs,
}

impl Presets {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let catalog = load_catalog(&self.batch.apply(config))?;
        for preset in &catalog.units {
            println!(
                "{:<18} {:<8} {:<10} {:<16} {}",
                preset.name,
                preset.faction.to_string(),
                preset.move_type.to_string(),
                preset.weapon.as_deref().unwrap_or("-"),
                preset
                    .skills
                    .iter()
                    .chain(&preset.affixes)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        Ok(())
    }
}
