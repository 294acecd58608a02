//! Sorted team storage for `BattleMode::Optimise`.

use crate::pokemon::PokemonInst;
use ordered_float::OrderedFloat;
use schema::Criterion;
use std::collections::BTreeMap;

/// Ascending-key list of Pokemon. Equal keys keep insertion order.
///
/// Keys are the chosen criterion value, or its reciprocal while `reversed` is
/// set, so flipping the flag inverts the order without a separate comparator.
#[derive(Debug, Clone)]
pub struct RankedList {
    criterion: Criterion,
    reversed: bool,
    // The sequence number breaks ties by insertion order.
    entries: BTreeMap<(OrderedFloat<f64>, u64), PokemonInst>,
    next_seq: u64,
}

impl RankedList {
    pub fn new(criterion: Criterion, reversed: bool) -> Self {
        RankedList {
            criterion,
            reversed,
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Key the Pokemon would be filed under right now.
    pub fn key_for(&self, pokemon: &PokemonInst) -> f64 {
        let value = pokemon.criterion_value(self.criterion);
        if self.reversed {
            1.0 / value
        } else {
            value
        }
    }

    /// Insert using the Pokemon's current criterion value.
    pub fn add(&mut self, pokemon: PokemonInst) {
        let key = self.key_for(&pokemon);
        self.insert_keyed(key, pokemon);
    }

    /// Put a survivor back after a round.
    ///
    /// Assembly ranks by the list's criterion, but survivors are filed by their
    /// current health, reciprocal while `reversed` is set.
    pub fn readd(&mut self, pokemon: PokemonInst) {
        let health = pokemon.criterion_value(Criterion::Health);
        let key = if self.reversed { 1.0 / health } else { health };
        self.insert_keyed(key, pokemon);
    }

    fn insert_keyed(&mut self, key: f64, pokemon: PokemonInst) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((OrderedFloat(key), seq), pokemon);
    }

    /// Remove and return the entry at `index` together with its key.
    pub fn delete_at(&mut self, index: usize) -> Option<(f64, PokemonInst)> {
        let slot = *self.entries.keys().nth(index)?;
        self.entries
            .remove(&slot)
            .map(|pokemon| (slot.0.into_inner(), pokemon))
    }

    /// Remove the lowest-keyed entry.
    pub fn delete_first(&mut self) -> Option<PokemonInst> {
        self.entries.pop_first().map(|(_, pokemon)| pokemon)
    }

    /// The Pokemon at list position `index`.
    pub fn get(&self, index: usize) -> Option<&PokemonInst> {
        self.entries.values().nth(index)
    }

    /// Keys in list order.
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.keys().map(|(key, _)| key.into_inner())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PokemonInst> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invert the order: flip `reversed` and re-key every entry to the
    /// reciprocal of its key. Entries go back in from the back of the list, so
    /// ties reverse too and two toggles restore the original order.
    pub fn toggle(&mut self) {
        self.reversed = !self.reversed;
        let entries = std::mem::take(&mut self.entries);
        for ((key, _), pokemon) in entries.into_iter().rev() {
            self.insert_keyed(1.0 / key.into_inner(), pokemon);
        }
    }

    pub(crate) fn drain(&mut self) -> Vec<PokemonInst> {
        std::mem::take(&mut self.entries).into_values().collect()
    }
}
