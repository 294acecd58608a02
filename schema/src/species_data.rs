use crate::PokeType;
use serde::{Deserialize, Serialize};

/// Catalogue entry for one selectable species stage.
///
/// Every stage of an evolution line is its own entry (a roster can offer both
/// Charmander and Charizard); `evolution_line` lists the full line so a fresh
/// instance knows how far it still has to go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub poke_type: PokeType,
    pub level: u32,
    pub health: u32,
    pub battle_power: u32,
    pub defence: u32,
    pub speed: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub evolution_line: Vec<String>,
}

impl SpeciesData {
    /// Position of this species in its evolution line, if it belongs to one.
    pub fn stage(&self) -> Option<usize> {
        self.evolution_line.iter().position(|stage| *stage == self.name)
    }

    /// True when the entry cannot evolve any further.
    pub fn is_final_stage(&self) -> bool {
        match self.stage() {
            Some(stage) => stage + 1 == self.evolution_line.len(),
            None => true,
        }
    }
}
