//! Species catalogue and the factory that turns entries into fresh Pokemon.

use crate::errors::{ConfigError, ConfigResult, TeamError, TeamResult};
use crate::pokemon::PokemonInst;
use schema::SpeciesData;
use std::path::Path;

const STANDARD_ROSTER: &str = include_str!("../data/roster.ron");

/// The list of species a trainer can pick from.
#[derive(Debug, Clone)]
pub struct Roster {
    species: Vec<SpeciesData>,
}

impl Roster {
    /// The roster shipped in `data/roster.ron`.
    pub fn standard() -> ConfigResult<Self> {
        Self::from_ron_str(STANDARD_ROSTER)
    }

    /// Load a roster from a RON file on disk.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_ron_str(&content)
    }

    /// Parse a roster from a RON list of species entries.
    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        let species: Vec<SpeciesData> = ron::from_str(content)?;
        Self::new(species)
    }

    /// Build a roster from already-parsed entries, checking each one.
    pub fn new(species: Vec<SpeciesData>) -> ConfigResult<Self> {
        if species.is_empty() {
            return Err(ConfigError::MalformedRoster("roster is empty".to_string()));
        }

        for entry in &species {
            if entry.health == 0 || entry.battle_power == 0 || entry.defence == 0 || entry.speed == 0
            {
                return Err(ConfigError::MalformedRoster(format!(
                    "{} needs positive health, battle power, defence and speed",
                    entry.name
                )));
            }
            if !entry.evolution_line.is_empty() && entry.stage().is_none() {
                return Err(ConfigError::MalformedRoster(format!(
                    "{} is not part of its own evolution line",
                    entry.name
                )));
            }
        }

        Ok(Roster { species })
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SpeciesData> {
        self.species.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesData> {
        self.species.iter()
    }

    /// Create a freshly initialised Pokemon from the entry at `index` (0-based).
    pub fn create(&self, index: usize) -> TeamResult<PokemonInst> {
        self.species
            .get(index)
            .map(PokemonInst::new)
            .ok_or(TeamError::InvalidSelection {
                index: index + 1,
                roster_size: self.species.len(),
            })
    }

    /// Numbered listing of every species, as shown to a player picking a team.
    pub fn options(&self) -> String {
        let mut listing = String::from("This is the list of Pokemon to choose from:\n");
        for (i, entry) in self.species.iter().enumerate() {
            listing.push_str(&format!("{}. {}\n", i + 1, entry.name));
        }
        listing
    }
}
