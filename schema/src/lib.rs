// Battle Tower Schema - Shared type definitions
// This crate contains the core enums and data records shared between the
// simulator library, its data files and its command-line front end.

// Re-export the main types
pub use battle_data::*;
pub use pokemon_types::*;
pub use species_data::*;

// Trait imports needed to use the strum derives from dependent crates.
pub use strum::{EnumCount, IntoEnumIterator};

pub mod battle_data;
pub mod pokemon_types;
pub mod species_data;
