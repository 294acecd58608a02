use crate::battle::engine::Battle;
use crate::battle::state::{BattleEvent, BattleReport};
use crate::pokemon::PokemonInst;
use crate::trainer::Trainer;
use crate::type_chart::TypeChart;
use schema::{BattleMode, Criterion, PokeType, SpeciesData};

/// A builder for test Pokemon with plain, easy-to-reason-about stats.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new("Pikachu", PokeType::Electric)
///     .with_power(50)
///     .with_speed(90)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    data: SpeciesData,
}

impl TestPokemonBuilder {
    /// Level 1, 100 health, 10 in every other stat, no evolution line.
    pub fn new(name: &str, poke_type: PokeType) -> Self {
        Self {
            data: SpeciesData {
                name: name.to_string(),
                poke_type,
                level: 1,
                health: 100,
                battle_power: 10,
                defence: 10,
                speed: 10,
                experience: 0,
                evolution_line: Vec::new(),
            },
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.data.health = health;
        self
    }

    pub fn with_power(mut self, battle_power: u32) -> Self {
        self.data.battle_power = battle_power;
        self
    }

    pub fn with_defence(mut self, defence: u32) -> Self {
        self.data.defence = defence;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.data.speed = speed;
        self
    }

    /// Sets the evolution line. The Pokemon's own name should be in it.
    pub fn with_evolution_line(mut self, line: &[&str]) -> Self {
        self.data.evolution_line = line.iter().map(|stage| stage.to_string()).collect();
        self
    }

    pub fn build(self) -> PokemonInst {
        PokemonInst::new(&self.data)
    }
}

/// Creates a trainer owning exactly the given Pokemon, in selection order.
pub fn create_test_trainer(name: &str, team: Vec<PokemonInst>) -> Trainer {
    match Trainer::with_team(name, team) {
        Ok(trainer) => trainer,
        Err(err) => panic!("Failed to build test trainer {}: {}", name, err),
    }
}

pub fn standard_chart() -> TypeChart {
    match TypeChart::standard() {
        Ok(chart) => chart,
        Err(err) => panic!("Failed to load the standard type chart: {}", err),
    }
}

/// Runs one full battle and returns its report.
pub fn run_battle(
    first: &mut Trainer,
    second: &mut Trainer,
    battle_mode: BattleMode,
    criterion: Criterion,
) -> BattleReport {
    let chart = standard_chart();
    Battle::new(first, second, battle_mode, criterion, &chart).commence_battle()
}

/// Names of the Pokemon a trainer sent out, in round order.
pub fn sent_out_by(report: &BattleReport, trainer_index: usize) -> Vec<String> {
    report
        .events
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::PokemonSentOut {
                player_index,
                pokemon,
                ..
            } if *player_index == trainer_index => Some(pokemon.clone()),
            _ => None,
        })
        .collect()
}

/// Every damage number in the report, in the order the hits landed.
pub fn damage_dealt(report: &BattleReport) -> Vec<(usize, f64, f64)> {
    report
        .events
        .events()
        .iter()
        .filter_map(|event| match event {
            BattleEvent::DamageDealt {
                attacker_index,
                damage,
                remaining_health,
                ..
            } => Some((*attacker_index, *damage, *remaining_health)),
            _ => None,
        })
        .collect()
}
