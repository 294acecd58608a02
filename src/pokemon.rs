use crate::type_chart::TypeChart;
use schema::{Criterion, PokeType, SpeciesData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier applied to combat stats on every evolution.
pub const EVOLUTION_MULTIPLIER: f64 = 1.5;

/// A name change produced by `PokemonInst::level_up`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evolution {
    pub from: String,
    pub to: String,
}

/// A Pokemon taking part in battles.
///
/// Combat stats are `f64` because evolution scales them by 1.5 and weak hits
/// are halved without rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String,
    pub poke_type: PokeType,
    pub level: u32,
    pub experience: u32,
    pub health: f64,
    pub battle_power: f64,
    pub defence: f64,
    pub speed: f64,
    pub evolution_line: Vec<String>,
    // Health captured when the Pokemon joined a team; restored by `regenerate`.
    health_record: f64,
    // Position in the owning team's selection order.
    team_slot: usize,
}

impl PokemonInst {
    /// Create a fresh instance from a catalogue entry.
    pub fn new(species_data: &SpeciesData) -> Self {
        let health = f64::from(species_data.health);
        PokemonInst {
            name: species_data.name.clone(),
            poke_type: species_data.poke_type,
            level: species_data.level.max(1),
            experience: species_data.experience,
            health,
            battle_power: f64::from(species_data.battle_power),
            defence: f64::from(species_data.defence),
            speed: f64::from(species_data.speed),
            evolution_line: species_data.evolution_line.clone(),
            health_record: health,
            team_slot: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Damage this Pokemon deals to `defender` before trainer scaling.
    pub fn attack(&self, defender: &PokemonInst, chart: &TypeChart) -> f64 {
        let raw = raw_damage(self.battle_power, defender.defence);
        raw * chart.effectiveness(self.poke_type, defender.poke_type)
    }

    /// Take a hit. Hits weaker than this Pokemon's defence are halved; hits at or
    /// above it land in full.
    pub fn defend(&mut self, damage: f64) {
        let effective_damage = if damage < self.defence {
            damage / 2.0
        } else {
            damage
        };
        self.health -= effective_damage;
    }

    /// Raise the level by one, evolving when a later stage exists.
    pub fn level_up(&mut self) -> Option<Evolution> {
        self.level += 1;
        let next_stage = self.stage()? + 1;
        let next_name = self.evolution_line.get(next_stage)?.clone();
        Some(self.evolve_into(next_name))
    }

    /// Position of the current name in the evolution line.
    pub fn stage(&self) -> Option<usize> {
        self.evolution_line.iter().position(|stage| *stage == self.name)
    }

    fn evolve_into(&mut self, next_name: String) -> Evolution {
        let from = std::mem::replace(&mut self.name, next_name);
        self.battle_power *= EVOLUTION_MULTIPLIER;
        self.health *= EVOLUTION_MULTIPLIER;
        self.speed *= EVOLUTION_MULTIPLIER;
        self.defence *= EVOLUTION_MULTIPLIER;
        tracing::debug!(from = %from, to = %self.name, level = self.level, "evolved");
        Evolution {
            from,
            to: self.name.clone(),
        }
    }

    /// End-of-round attrition when both combatants are still standing.
    pub fn take_chip_damage(&mut self) {
        self.health -= 1.0;
    }

    /// Numeric value of the given ranking attribute.
    pub fn criterion_value(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Health => self.health,
            Criterion::Defence => self.defence,
            Criterion::BattlePower => self.battle_power,
            Criterion::Speed => self.speed,
            Criterion::Level => f64::from(self.level),
        }
    }

    pub fn health_record(&self) -> f64 {
        self.health_record
    }

    /// Snapshot the current health as the value `regenerate` restores.
    pub fn record_health(&mut self) {
        self.health_record = self.health;
    }

    /// Restore health to the recorded snapshot. Level and evolution are kept.
    pub fn regenerate(&mut self) {
        self.health = self.health_record;
    }

    pub(crate) fn team_slot(&self) -> usize {
        self.team_slot
    }

    pub(crate) fn set_team_slot(&mut self, slot: usize) {
        self.team_slot = slot;
    }
}

impl fmt::Display for PokemonInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Level {}) with {} health and {} experience",
            self.name, self.level, self.health, self.experience
        )
    }
}

/// Damage from `attack` against `defence` before type effectiveness.
pub fn raw_damage(attack: f64, defence: f64) -> f64 {
    if defence < attack / 2.0 {
        attack - defence
    } else if defence < attack {
        (attack * 5.0 / 8.0 - defence / 4.0).ceil()
    } else {
        (attack / 4.0).ceil()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn charmander() -> SpeciesData {
        SpeciesData {
            name: "Charmander".to_string(),
            poke_type: PokeType::Fire,
            level: 1,
            health: 40,
            battle_power: 40,
            defence: 10,
            speed: 8,
            experience: 0,
            evolution_line: vec![
                "Charmander".to_string(),
                "Charmeleon".to_string(),
                "Charizard".to_string(),
            ],
        }
    }

    // Defence below half the attack: straight subtraction.
    #[rstest]
    #[case::weak_defence(50.0, 10.0, 40.0)]
    // Defence between half and full attack: ceil(atk*5/8 - def/4).
    #[case::middle_branch(40.0, 30.0, 18.0)]
    #[case::exactly_half(40.0, 20.0, 20.0)]
    // Defence at or above the attack: ceil(atk/4).
    #[case::equal(50.0, 50.0, 13.0)]
    #[case::wall(10.0, 90.0, 3.0)]
    fn test_raw_damage_branches(#[case] attack: f64, #[case] defence: f64, #[case] expected: f64) {
        assert_eq!(raw_damage(attack, defence), expected);
    }

    #[test]
    fn test_attack_applies_type_effectiveness() {
        let chart = TypeChart::standard().unwrap();
        let attacker = PokemonInst::new(&charmander());
        let mut grass = charmander();
        grass.poke_type = PokeType::Grass;
        grass.defence = 30;
        let defender = PokemonInst::new(&grass);

        // 40 power vs 30 defence = 18 raw, doubled by Fire vs Grass.
        assert_eq!(attacker.attack(&defender, &chart), 36.0);
    }

    #[test]
    fn test_defend_halves_only_weak_hits() {
        let mut pokemon = PokemonInst::new(&charmander());

        // 6 < defence 10: halved.
        pokemon.defend(6.0);
        assert_eq!(pokemon.health, 37.0);

        // 10 is not below defence 10: full damage.
        pokemon.defend(10.0);
        assert_eq!(pokemon.health, 27.0);

        // Odd weak hits leave fractional health.
        pokemon.defend(3.0);
        assert_eq!(pokemon.health, 25.5);
    }

    #[test]
    fn test_is_alive_tracks_health() {
        let mut pokemon = PokemonInst::new(&charmander());
        pokemon.defend(39.0);
        assert!(pokemon.is_alive());
        pokemon.take_chip_damage();
        assert_eq!(pokemon.health, 0.0);
        assert!(!pokemon.is_alive());
        pokemon.defend(20.0);
        assert!(!pokemon.is_alive());
    }

    #[test]
    fn test_level_up_evolves_and_compounds() {
        let mut pokemon = PokemonInst::new(&charmander());

        let evolution = pokemon.level_up();
        assert_eq!(
            evolution,
            Some(Evolution {
                from: "Charmander".to_string(),
                to: "Charmeleon".to_string()
            })
        );
        assert_eq!(pokemon.level, 2);
        assert_eq!(pokemon.battle_power, 60.0);
        assert_eq!(pokemon.health, 60.0);
        assert_eq!(pokemon.defence, 15.0);
        assert_eq!(pokemon.speed, 12.0);

        pokemon.level_up();
        assert_eq!(pokemon.name, "Charizard");
        assert_eq!(pokemon.battle_power, 90.0);
        assert_eq!(pokemon.defence, 22.5);

        // Final stage: levels keep rising, stats stay put.
        assert_eq!(pokemon.level_up(), None);
        assert_eq!(pokemon.level, 4);
        assert_eq!(pokemon.battle_power, 90.0);
    }

    #[test]
    fn test_level_up_without_evolution_line() {
        let mut data = charmander();
        data.name = "Lapras".to_string();
        data.evolution_line.clear();
        let mut pokemon = PokemonInst::new(&data);

        assert_eq!(pokemon.level_up(), None);
        assert_eq!(pokemon.level, 2);
        assert_eq!(pokemon.health, 40.0);
    }

    #[test]
    fn test_regenerate_restores_recorded_health() {
        let mut pokemon = PokemonInst::new(&charmander());
        pokemon.defend(30.0);
        pokemon.level_up();
        pokemon.regenerate();

        // The record predates the evolution, so the boost is not kept.
        assert_eq!(pokemon.health, 40.0);
        assert_eq!(pokemon.name, "Charmeleon");
    }

    #[test]
    fn test_criterion_values() {
        let pokemon = PokemonInst::new(&charmander());
        assert_eq!(pokemon.criterion_value(Criterion::Health), 40.0);
        assert_eq!(pokemon.criterion_value(Criterion::Defence), 10.0);
        assert_eq!(pokemon.criterion_value(Criterion::BattlePower), 40.0);
        assert_eq!(pokemon.criterion_value(Criterion::Speed), 8.0);
        assert_eq!(pokemon.criterion_value(Criterion::Level), 1.0);
    }

    #[test]
    fn test_display() {
        let pokemon = PokemonInst::new(&charmander());
        assert_eq!(
            pokemon.to_string(),
            "Charmander (Level 1) with 40 health and 0 experience"
        );
    }
}
