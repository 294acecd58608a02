//! Battle Tower
//!
//! Turn-based battles between trainers' teams under three team disciplines
//! (stack, rotation and ranked), chained into a battle tower where the player
//! faces a queue of opponents until lives run out.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod errors;
pub mod formation;
pub mod pokemon;
pub mod ranked;
pub mod species;
pub mod team;
pub mod tower;
pub mod trainer;
pub mod type_chart;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BattleMode, Criterion, PokeType, SelectionMethod, SpeciesData};

// --- From this crate's modules (`src/`) ---

// Battle engine and its results.
pub use battle::engine::Battle;
pub use battle::state::{BattleEvent, BattleReport, EventBus, GameState};

// Runtime types.
pub use formation::Formation;
pub use pokemon::{Evolution, PokemonInst};
pub use ranked::RankedList;
pub use team::{PokeTeam, TEAM_LIMIT};
pub use trainer::Trainer;

// Tower and its configuration.
pub use config::{TowerConfig, TowerRules};
pub use tower::{BattleTower, Challenger, TowerBattle, TowerOutcome};

// Data access.
pub use species::Roster;
pub use type_chart::TypeChart;

// Crate-specific error and result types.
pub use errors::{
    BattleTowerError, BattleTowerResult, ConfigError, ConfigResult, TeamError, TeamResult,
};
