//! Repeated duels between two presets.
//!
//! Each trial rebuilds both units from their presets, so trials never share
//! HP or battle flags. Trial `i` of stream `s` always draws from
//! `compute_seed(base_seed, i, s)`.

use anyhow::Result;
use combat_content::Catalog;
use combat_core::env::ArtUsage;
use combat_core::{
    CombatResult, CombatScene, CombatUnit, Exchange, Forecast, ModifierContext, PcgRng, Position,
    TableHooks, UnitId, art_modifiers, attack_range, compute_seed, forecast, resolve,
};
use serde::{Deserialize, Serialize};

/// One attacker/defender pairing to simulate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Duel {
    pub attacker: String,
    pub defender: String,
    /// Terrain name under the defender.
    pub defender_terrain: Option<String>,
    /// Weapon art id the attacker opens with.
    pub art: Option<String>,
    /// Overrides the attacker's minimum range.
    pub distance: Option<u32>,
}

impl Duel {
    pub fn new(attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        Self {
            attacker: attacker.into(),
            defender: defender.into(),
            ..Self::default()
        }
    }
}

/// Aggregated outcome of one duel across all trials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupStats {
    pub attacker: String,
    pub defender: String,
    pub trials: u32,
    /// Trials in which the defender died.
    pub attacker_kills: u32,
    /// Trials in which the attacker died.
    pub defender_kills: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    /// Post-combat poison landed by either side.
    pub poison: u64,
    pub strikes: u64,
    pub forecast: Forecast,
}

impl MatchupStats {
    fn empty(duel: &Duel, trials: u32, forecast: Forecast) -> Self {
        Self {
            attacker: duel.attacker.clone(),
            defender: duel.defender.clone(),
            trials,
            attacker_kills: 0,
            defender_kills: 0,
            damage_dealt: 0,
            damage_taken: 0,
            poison: 0,
            strikes: 0,
            forecast,
        }
    }

    fn record(&mut self, result: &CombatResult, attacker: UnitId, defender: UnitId) {
        if result.defender_died {
            self.attacker_kills += 1;
        }
        if result.attacker_died {
            self.defender_kills += 1;
        }
        self.damage_dealt += result.damage_dealt_by(attacker).max(0) as u64;
        self.damage_taken += result.damage_dealt_by(defender).max(0) as u64;
        self.poison += result.poison.iter().map(|p| p.damage.max(0) as u64).sum::<u64>();
        self.strikes += result.strikes().count() as u64;
    }

    pub fn kill_rate(&self) -> f64 {
        ratio(u64::from(self.attacker_kills), self.trials)
    }

    pub fn death_rate(&self) -> f64 {
        ratio(u64::from(self.defender_kills), self.trials)
    }

    pub fn avg_damage_dealt(&self) -> f64 {
        ratio(self.damage_dealt, self.trials)
    }

    pub fn avg_damage_taken(&self) -> f64 {
        ratio(self.damage_taken, self.trials)
    }

    /// Whether the attacker strikes twice per exchange.
    pub fn doubles(&self) -> bool {
        self.forecast.attacker.doubles
    }
}

fn ratio(value: u64, trials: u32) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    value as f64 / f64::from(trials)
}

/// Fully prepared exchange inputs for one duel.
struct Setup {
    attacker: CombatUnit,
    defender: CombatUnit,
    context: ModifierContext,
    distance: u32,
}

fn prepare(catalog: &Catalog, duel: &Duel) -> Result<Setup> {
    let mut attacker = catalog.unit(&duel.attacker, UnitId(1), Position::new(0, 0))?;
    let defender_preset = catalog
        .preset(&duel.defender)
        .ok_or_else(|| anyhow::anyhow!("Unknown unit preset '{}'", duel.defender))?;
    let terrain = match &duel.defender_terrain {
        Some(name) => Some(
            catalog
                .terrain(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown terrain '{}'", name))?,
        ),
        None => None,
    };

    // Place the defender once the range is known; conditions read positions.
    let placeholder = defender_preset.build(UnitId(2), Position::new(1, 0), &catalog.weapons)?;
    let attacker_mods = CombatScene::new(&attacker, &placeholder, true)
        .modifiers(&catalog.abilities, &catalog.affixes);
    // Staff users and the unarmed still get a (non-combat) exchange at melee.
    let weapon = attacker.combat_weapon();
    let distance = duel.distance.unwrap_or_else(|| {
        weapon.map_or(1, |w| attack_range(w, &attacker_mods).min.max(1))
    });

    let art = match &duel.art {
        Some(id) => {
            let art = catalog
                .art(id)
                .ok_or_else(|| anyhow::anyhow!("Unknown weapon art '{}'", id))?;
            art.check(&attacker, &ArtUsage::default(), true, None)
                .map_err(|e| anyhow::anyhow!("'{}' cannot use {}: {}", duel.attacker, art.name, e))?;
            let mods = art_modifiers(art, weapon);
            attacker.current_hp = art.hp_after_cost(attacker.current_hp);
            Some(mods)
        }
        None => None,
    };

    let defender = defender_preset.build(
        UnitId(2),
        Position::new(distance as i32, 0),
        &catalog.weapons,
    )?;
    let attacker_mods = CombatScene::new(&attacker, &defender, true)
        .modifiers(&catalog.abilities, &catalog.affixes);
    let defender_mods = CombatScene::new(&defender, &attacker, false)
        .with_terrain(terrain)
        .modifiers(&catalog.abilities, &catalog.affixes);

    let mut context = ModifierContext::new(attacker_mods, defender_mods);
    if let Some(art) = art {
        context = context.with_attacker_art(art);
    }

    Ok(Setup {
        attacker,
        defender,
        context,
        distance,
    })
}

/// RNG-free preview of one duel, with the same setup a matchup run uses.
pub fn forecast_duel(catalog: &Catalog, duel: &Duel) -> Result<Forecast> {
    let setup = prepare(catalog, duel)?;
    let terrain = duel.defender_terrain.as_deref().and_then(|t| catalog.terrain(t));
    let exchange = Exchange::new(&setup.attacker, &setup.defender, &setup.context, &catalog.config)
        .at_distance(setup.distance)
        .with_terrain(None, terrain)
        .with_affixes(&catalog.affixes);
    Ok(forecast(&exchange))
}

/// Runs `trials` seeded exchanges of one duel.
///
/// # Arguments
///
/// * `stream` - Discriminator mixed into every trial seed; matrix runs pass
///   the pairing index so pairings never share random streams
pub fn run_matchup(
    catalog: &Catalog,
    duel: &Duel,
    trials: u32,
    base_seed: u64,
    stream: u32,
) -> Result<MatchupStats> {
    let setup = prepare(catalog, duel)?;
    let terrain = duel.defender_terrain.as_deref().and_then(|t| catalog.terrain(t));
    let exchange = Exchange::new(&setup.attacker, &setup.defender, &setup.context, &catalog.config)
        .at_distance(setup.distance)
        .with_terrain(None, terrain)
        .with_affixes(&catalog.affixes);
    let hooks = TableHooks::new(&catalog.abilities, &catalog.affixes);

    let preview = forecast(&exchange);
    let mut stats = MatchupStats::empty(duel, trials, preview);
    for trial in 0..trials {
        let mut rng = PcgRng::new(compute_seed(base_seed, u64::from(trial), stream));
        let result = resolve(&exchange, &hooks, &mut rng);
        tracing::trace!(
            trial,
            attacker_hp = result.attacker_hp,
            defender_hp = result.defender_hp,
            "trial resolved"
        );
        stats.record(&result, setup.attacker.id, setup.defender.id);
    }

    tracing::debug!(
        attacker = %duel.attacker,
        defender = %duel.defender,
        trials,
        kills = stats.attacker_kills,
        deaths = stats.defender_kills,
        "matchup finished"
    );
    Ok(stats)
}

/// Every ordered pairing of distinct presets.
///
/// Pairing `k` in iteration order uses stream `k`.
pub fn run_matrix(
    catalog: &Catalog,
    names: &[String],
    trials: u32,
    base_seed: u64,
) -> Result<Vec<MatchupStats>> {
    let mut out = Vec::with_capacity(names.len() * names.len().saturating_sub(1));
    let mut stream = 0u32;
    for attacker in names {
        for defender in names {
            if attacker == defender {
                continue;
            }
            let duel = Duel::new(attacker.as_str(), defender.as_str());
            out.push(run_matchup(catalog, &duel, trials, base_seed, stream)?);
            stream += 1;
        }
    }
    Ok(out)
}
