use crate::errors::{TeamError, TeamResult};
use crate::pokemon::PokemonInst;
use crate::species::Roster;
use crate::team::PokeTeam;
use rand::Rng;
use schema::{EnumCount, PokeType, SelectionMethod};
use std::collections::BTreeSet;
use std::fmt;

/// A trainer: one team plus the set of types they have come across.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub name: String,
    team: PokeTeam,
    pokedex: BTreeSet<PokeType>,
    team_registered: bool,
}

impl Trainer {
    pub fn new(name: impl Into<String>) -> Self {
        Trainer {
            name: name.into(),
            team: PokeTeam::new(),
            pokedex: BTreeSet::new(),
            team_registered: false,
        }
    }

    /// Build a trainer around an already-chosen list of Pokemon.
    pub fn with_team(name: impl Into<String>, pokemon: Vec<PokemonInst>) -> TeamResult<Self> {
        if pokemon.is_empty() {
            return Err(TeamError::EmptySelection);
        }
        let mut trainer = Trainer::new(name);
        for member in pokemon {
            trainer.team.add(member)?;
        }
        Ok(trainer)
    }

    /// Select a team using the given method.
    ///
    /// `Manual` needs explicit roster numbers; use `pick_team_from` for that.
    pub fn pick_team<R: Rng + ?Sized>(
        &mut self,
        method: SelectionMethod,
        roster: &Roster,
        rng: &mut R,
    ) -> TeamResult<()> {
        match method {
            SelectionMethod::Random => {
                self.team.choose_randomly(roster, rng)?;
                self.team_registered = false;
                Ok(())
            }
            SelectionMethod::Manual => Err(TeamError::ManualSelectionUnavailable),
        }
    }

    /// Select a team by 1-based roster numbers.
    pub fn pick_team_from(&mut self, roster: &Roster, selections: &[usize]) -> TeamResult<()> {
        self.team.choose_from(roster, selections)?;
        self.team_registered = false;
        Ok(())
    }

    /// Add the types of the trainer's own team to the pokedex. Only the first
    /// call after a team is picked has any effect.
    pub fn register_team(&mut self) {
        if self.team_registered {
            return;
        }
        let types: Vec<PokeType> = self
            .team
            .selected()
            .into_iter()
            .map(|pokemon| pokemon.poke_type)
            .collect();
        self.pokedex.extend(types);
        self.team_registered = true;
    }

    /// Record an encountered Pokemon's type. Returns whether it was new.
    pub fn register_pokemon(&mut self, pokemon: &PokemonInst) -> bool {
        self.register_type(pokemon.poke_type)
    }

    pub fn register_type(&mut self, poke_type: PokeType) -> bool {
        self.pokedex.insert(poke_type)
    }

    pub fn is_team_registered(&self) -> bool {
        self.team_registered
    }

    /// Share of all types discovered, rounded to two decimals.
    pub fn pokedex_completion(&self) -> f64 {
        let fraction = self.pokedex.len() as f64 / PokeType::COUNT as f64;
        (fraction * 100.0).round() / 100.0
    }

    pub fn pokedex(&self) -> &BTreeSet<PokeType> {
        &self.pokedex
    }

    pub fn team(&self) -> &PokeTeam {
        &self.team
    }

    pub fn team_mut(&mut self) -> &mut PokeTeam {
        &mut self.team
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let percent = (self.pokedex_completion() * 100.0).round();
        write!(f, "Trainer {} Pokedex Completion: {}%", self.name, percent)
    }
}
