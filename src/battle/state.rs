use schema::PokeType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Player1Win,
    Player2Win,
    Draw,
}

impl GameState {
    /// Index of the winning trainer, if any.
    pub fn winner(self) -> Option<usize> {
        match self {
            GameState::Player1Win => Some(0),
            GameState::Player2Win => Some(1),
            GameState::InProgress | GameState::Draw => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameState::InProgress
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Round Management
    RoundStarted {
        round: u32,
    },
    RoundEnded,

    // Pokemon Actions
    PokemonSentOut {
        player_index: usize,
        pokemon: String,
        level: u32,
        health: f64,
    },
    TypeRegistered {
        player_index: usize,
        poke_type: PokeType,
    },
    DamageDealt {
        attacker_index: usize,
        attacker: String,
        defender: String,
        damage: f64,
        remaining_health: f64,
    },
    ChipDamage {
        pokemon: [String; 2],
    },

    // Requeue
    PokemonFainted {
        player_index: usize,
        pokemon: String,
    },
    PokemonLevelledUp {
        player_index: usize,
        pokemon: String,
        new_level: u32,
    },
    PokemonEvolved {
        player_index: usize,
        from: String,
        to: String,
    },
    PokemonReturned {
        player_index: usize,
        pokemon: String,
    },

    // Battle End
    BattleEnded {
        outcome: GameState,
    },
}

impl BattleEvent {
    /// Human-readable text for the event, or `None` for events that are only
    /// useful in the raw log.
    pub fn format(&self, trainer_names: &[String; 2]) -> Option<String> {
        match self {
            BattleEvent::RoundStarted { round } => Some(format!("=== Round {} ===", round)),
            BattleEvent::RoundEnded => None,

            BattleEvent::PokemonSentOut {
                player_index,
                pokemon,
                level,
                health,
            } => Some(format!(
                "{} sent out {} (Level {}, {} health)!",
                trainer_names[*player_index], pokemon, level, health
            )),
            BattleEvent::TypeRegistered {
                player_index,
                poke_type,
            } => Some(format!(
                "{} registered the {} type in their Pokedex.",
                trainer_names[*player_index], poke_type
            )),
            BattleEvent::DamageDealt {
                attacker,
                defender,
                damage,
                remaining_health,
                ..
            } => Some(format!(
                "{} hit {} for {} damage ({} health left).",
                attacker, defender, damage, remaining_health
            )),
            BattleEvent::ChipDamage { pokemon } => Some(format!(
                "{} and {} each lose 1 health.",
                pokemon[0], pokemon[1]
            )),

            BattleEvent::PokemonFainted {
                player_index,
                pokemon,
            } => Some(format!(
                "{}'s {} fainted!",
                trainer_names[*player_index], pokemon
            )),
            BattleEvent::PokemonLevelledUp {
                pokemon, new_level, ..
            } => Some(format!("{} grew to level {}!", pokemon, new_level)),
            BattleEvent::PokemonEvolved { from, to, .. } => {
                Some(format!("{} evolved into {}!", from, to))
            }
            BattleEvent::PokemonReturned { .. } => None,

            BattleEvent::BattleEnded { outcome } => match outcome.winner() {
                Some(index) => Some(format!("{} wins the battle!", trainer_names[index])),
                None => Some("The battle ended in a draw!".to_string()),
            },
        }
    }
}

/// Ordered log of everything that happened in one battle.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Formatted lines for every event that has text.
    pub fn formatted(&self, trainer_names: &[String; 2]) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|event| event.format(trainer_names))
            .collect()
    }

    /// Print all events using their formatted text. Silent events are skipped.
    pub fn print_formatted(&self, trainer_names: &[String; 2]) {
        for line in self.formatted(trainer_names) {
            println!("  {}", line);
        }
    }
}

/// What a finished battle hands back to its caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BattleReport {
    pub trainer_names: [String; 2],
    pub outcome: GameState,
    pub rounds: u32,
    pub events: EventBus,
}

impl BattleReport {
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome
            .winner()
            .map(|index| self.trainer_names[index].as_str())
    }
}
