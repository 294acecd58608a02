use crate::errors::{TeamError, TeamResult};
use crate::formation::Formation;
use crate::pokemon::PokemonInst;
use crate::species::Roster;
use rand::Rng;
use schema::{BattleMode, Criterion};
use std::fmt;

/// Maximum number of Pokemon on a team.
pub const TEAM_LIMIT: usize = 6;

/// A trainer's team: the selected Pokemon and the formation they fight in.
///
/// Every Pokemon the team owns is in exactly one place: on the bench (selected
/// but not yet assembled), in the formation, out for a round, or on the fainted
/// pile. Reassembling gathers them all back in selection order.
#[derive(Debug, Clone, Default)]
pub struct PokeTeam {
    bench: Vec<PokemonInst>,
    formation: Option<Formation>,
    fainted: Vec<PokemonInst>,
    // Sticky across reassembly, flipped by toggling a ranked formation.
    ranking_reversed: bool,
    team_count: usize,
}

impl PokeTeam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill all six slots with random species from the roster.
    pub fn choose_randomly<R: Rng + ?Sized>(
        &mut self,
        roster: &Roster,
        rng: &mut R,
    ) -> TeamResult<()> {
        *self = PokeTeam::new();
        for _ in 0..TEAM_LIMIT {
            let index = rng.random_range(0..roster.len());
            self.enlist(roster.create(index)?);
        }
        Ok(())
    }

    /// Select species by their 1-based roster numbers.
    pub fn choose_from(&mut self, roster: &Roster, selections: &[usize]) -> TeamResult<()> {
        if selections.is_empty() {
            return Err(TeamError::EmptySelection);
        }
        if selections.len() > TEAM_LIMIT {
            return Err(TeamError::TooManySelected {
                requested: selections.len(),
                limit: TEAM_LIMIT,
            });
        }

        let mut chosen = Vec::with_capacity(selections.len());
        for &selection in selections {
            let pokemon = selection
                .checked_sub(1)
                .ok_or(TeamError::InvalidSelection {
                    index: selection,
                    roster_size: roster.len(),
                })
                .and_then(|index| roster.create(index))?;
            chosen.push(pokemon);
        }

        *self = PokeTeam::new();
        for pokemon in chosen {
            self.enlist(pokemon);
        }
        Ok(())
    }

    /// Add one already-built Pokemon to the selection.
    pub fn add(&mut self, pokemon: PokemonInst) -> TeamResult<()> {
        if self.team_count >= TEAM_LIMIT {
            return Err(TeamError::TooManySelected {
                requested: self.team_count + 1,
                limit: TEAM_LIMIT,
            });
        }
        self.enlist(pokemon);
        Ok(())
    }

    fn enlist(&mut self, mut pokemon: PokemonInst) {
        pokemon.set_team_slot(self.team_count);
        pokemon.record_health();
        self.team_count += 1;
        self.bench.push(pokemon);
    }

    /// Number of Pokemon selected, fainted or not.
    pub fn team_count(&self) -> usize {
        self.team_count
    }

    /// Every selected Pokemon, wherever it currently is, in selection order.
    pub fn selected(&self) -> Vec<&PokemonInst> {
        let mut all: Vec<&PokemonInst> = self
            .bench
            .iter()
            .chain(self.formation.iter().flat_map(|f| f.in_draw_order()))
            .chain(self.fainted.iter())
            .collect();
        all.sort_by_key(|pokemon| pokemon.team_slot());
        all
    }

    /// Arrange the whole selection for a battle, fainted Pokemon included.
    pub fn assemble(&mut self, battle_mode: BattleMode, criterion: Criterion) {
        let members = self.gather();
        self.formation = Some(Formation::assemble(
            battle_mode,
            criterion,
            self.ranking_reversed,
            members,
        ));
    }

    /// Restore every Pokemon's recorded health, then reassemble.
    pub fn regenerate(&mut self, battle_mode: BattleMode, criterion: Criterion) {
        let mut members = self.gather();
        for pokemon in members.iter_mut() {
            pokemon.regenerate();
        }
        self.bench = members;
        self.assemble(battle_mode, criterion);
    }

    fn gather(&mut self) -> Vec<PokemonInst> {
        let mut members = std::mem::take(&mut self.bench);
        if let Some(mut formation) = self.formation.take() {
            members.extend(formation.drain());
        }
        members.append(&mut self.fainted);
        members.sort_by_key(|pokemon| pokemon.team_slot());
        members
    }

    /// The discipline the team is currently assembled in.
    pub fn battle_mode(&self) -> Option<BattleMode> {
        self.formation.as_ref().map(Formation::battle_mode)
    }

    pub fn formation(&self) -> Option<&Formation> {
        self.formation.as_ref()
    }

    pub fn is_ranking_reversed(&self) -> bool {
        self.ranking_reversed
    }

    /// Pokemon currently in the field.
    pub fn len(&self) -> usize {
        self.formation.as_ref().map_or(0, Formation::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Send the next Pokemon out. Ownership moves to the caller.
    pub fn draw(&mut self) -> Option<PokemonInst> {
        self.formation.as_mut()?.draw()
    }

    /// Return a Pokemon that survived its round.
    pub fn give_back(&mut self, pokemon: PokemonInst) {
        match self.formation.as_mut() {
            Some(formation) => formation.give_back(pokemon),
            None => self.bench.push(pokemon),
        }
    }

    /// Take a fainted Pokemon out of play until the next regeneration.
    pub fn retire(&mut self, pokemon: PokemonInst) {
        self.fainted.push(pokemon);
    }

    /// Vary the draw order between battles; see `Formation::toggle`.
    pub fn toggle(&mut self) {
        if let Some(formation) = self.formation.as_mut() {
            formation.toggle();
            if let Formation::Ranked(list) = formation {
                self.ranking_reversed = list.is_reversed();
            }
        }
    }

    /// Pokemon in the field in draw order; the bench if not yet assembled.
    pub fn members_in_order(&self) -> Vec<&PokemonInst> {
        match &self.formation {
            Some(formation) => formation.in_draw_order(),
            None => self.bench.iter().collect(),
        }
    }
}

impl fmt::Display for PokeTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members = self.members_in_order();
        if members.is_empty() {
            return writeln!(f, "The team is currently empty.");
        }
        for (i, pokemon) in members.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, pokemon)?;
        }
        Ok(())
    }
}
