use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString};

/// Elemental type of a Pokemon.
///
/// The discriminants double as indices into dense per-type tables such as the
/// type chart, so the order here is load-bearing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum PokeType {
    Fire = 0,
    Water = 1,
    Grass = 2,
    Bug = 3,
    Dragon = 4,
    Electric = 5,
    Fighting = 6,
    Flying = 7,
    Ghost = 8,
    Ground = 9,
    Ice = 10,
    Normal = 11,
    Poison = 12,
    Psychic = 13,
    Rock = 14,
}

impl PokeType {
    /// Position of this type in dense per-type tables.
    pub fn index(self) -> usize {
        self as usize
    }
}
