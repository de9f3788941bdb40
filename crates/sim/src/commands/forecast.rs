//! Print one forecast.

use anyhow::Result;
use clap::Parser;
use combat_core::SidePreview;
use combat_sim::{Duel, SimConfig, forecast_duel, load_catalog};

use super::BatchArgs;

/// Show the RNG-free forecast for one pairing
#[derive(Parser)]
pub struct ForecastCmd {
    /// Attacking preset
    #[arg(value_name = "ATTACKER")]
    attacker: String,

    /// Defending preset
    #[arg(value_name = "DEFENDER")]
    defender: String,

    /// Terrain under the defender
    #[arg(long, value_name = "TERRAIN")]
    terrain: Option<String>,

    /// Weapon art the attacker uses
    #[arg(long, value_name = "ART")]
    art: Option<String>,

    /// Exchange distance (defaults to the attacker's minimum range)
    #[arg(long, value_name = "TILES")]
    distance: Option<u32>,

    #[command(flatten)]
    batch: BatchArgs,
}

impl ForecastCmd {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let catalog = load_catalog(&self.batch.apply(config))?;
        let duel = Duel {
            attacker: self.attacker,
            defender: self.defender,
            defender_terrain: self.terrain,
            art: self.art,
            distance: self.distance,
        };
        let preview = forecast_duel(&catalog, &duel)?;

        print_side(&preview.attacker);
        print_side(&preview.defender);
        Ok(())
    }
}

fn print_side(side: &SidePreview) {
    let strikes = if side.can_attack {
        format!("x{}", side.attack_count)
    } else {
        "--".to_string()
    };
    println!(
        "{:<18} HP {:>3}  DMG {:>3} {:<3}  HIT {:>3}  CRIT {:>3}  AS {:>3}",
        side.name, side.hp, side.damage, strikes, side.hit, side.crit, side.attack_speed
    );
    for activation in &side.activated {
        println!("    + {}", activation.name);
    }
    for warning in &side.warnings {
        println!("    ! {warning}");
    }
}
