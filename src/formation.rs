//! The three team disciplines behind one closed enum.
//!
//! A `Formation` owns the Pokemon currently in the field. `draw` moves one out
//! for a round; `give_back` is the only way back in.

use crate::pokemon::PokemonInst;
use crate::ranked::RankedList;
use crate::team::TEAM_LIMIT;
use schema::{BattleMode, Criterion};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub enum Formation {
    /// `BattleMode::Set`: the top of the stack is the end of the vector.
    Stack(Vec<PokemonInst>),
    /// `BattleMode::Rotate`: bounded circular queue.
    Rotation(VecDeque<PokemonInst>),
    /// `BattleMode::Optimise`: sorted by criterion.
    Ranked(RankedList),
}

impl Formation {
    /// Arrange `members` (in selection order) for the given mode.
    pub fn assemble(
        battle_mode: BattleMode,
        criterion: Criterion,
        reversed: bool,
        members: Vec<PokemonInst>,
    ) -> Self {
        assert!(
            members.len() <= TEAM_LIMIT,
            "cannot field {} Pokemon, the limit is {}",
            members.len(),
            TEAM_LIMIT
        );

        match battle_mode {
            // Pushed in selection order, so the last selected is on top.
            BattleMode::Set => Formation::Stack(members),
            BattleMode::Rotate => {
                let mut queue = VecDeque::with_capacity(TEAM_LIMIT);
                queue.extend(members);
                Formation::Rotation(queue)
            }
            BattleMode::Optimise => {
                let mut list = RankedList::new(criterion, reversed);
                for pokemon in members {
                    list.add(pokemon);
                }
                Formation::Ranked(list)
            }
        }
    }

    pub fn battle_mode(&self) -> BattleMode {
        match self {
            Formation::Stack(_) => BattleMode::Set,
            Formation::Rotation(_) => BattleMode::Rotate,
            Formation::Ranked(_) => BattleMode::Optimise,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Formation::Stack(stack) => stack.len(),
            Formation::Rotation(queue) => queue.len(),
            Formation::Ranked(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the next Pokemon to fight.
    pub fn draw(&mut self) -> Option<PokemonInst> {
        match self {
            Formation::Stack(stack) => stack.pop(),
            Formation::Rotation(queue) => queue.pop_front(),
            Formation::Ranked(list) => list.delete_first(),
        }
    }

    /// Return a surviving Pokemon after a round.
    pub fn give_back(&mut self, pokemon: PokemonInst) {
        assert!(
            self.len() < TEAM_LIMIT,
            "formation is full, cannot take back {}",
            pokemon.name
        );

        match self {
            Formation::Stack(stack) => stack.push(pokemon),
            Formation::Rotation(queue) => queue.push_back(pokemon),
            Formation::Ranked(list) => list.readd(pokemon),
        }
    }

    /// Shake up the order between battles.
    ///
    /// - Stack: the top half (`len / 2` Pokemon) is reversed.
    /// - Rotation: the front `ceil(len / 2)` keep their order and the trailing
    ///   `floor(len / 2)` are reversed.
    /// - Ranked: the whole order is inverted.
    pub fn toggle(&mut self) {
        match self {
            Formation::Stack(stack) => {
                let len = stack.len();
                stack[len - len / 2..].reverse();
            }
            Formation::Rotation(queue) => {
                let keep = queue.len().div_ceil(2);
                queue.make_contiguous()[keep..].reverse();
            }
            Formation::Ranked(list) => list.toggle(),
        }
    }

    /// The Pokemon in the order they would be drawn.
    pub fn in_draw_order(&self) -> Vec<&PokemonInst> {
        match self {
            Formation::Stack(stack) => stack.iter().rev().collect(),
            Formation::Rotation(queue) => queue.iter().collect(),
            Formation::Ranked(list) => list.iter().collect(),
        }
    }

    /// Empty the formation, handing every Pokemon back to the caller.
    pub(crate) fn drain(&mut self) -> Vec<PokemonInst> {
        match self {
            Formation::Stack(stack) => std::mem::take(stack),
            Formation::Rotation(queue) => queue.drain(..).collect(),
            Formation::Ranked(list) => list.drain(),
        }
    }
}
