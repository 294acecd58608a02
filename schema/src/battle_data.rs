use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Team discipline used for a battle.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum BattleMode {
    /// Last selected fights first; survivors go back on top.
    Set,
    /// First in line fights; survivors rejoin at the back.
    Rotate,
    /// Lowest-ranked by the chosen criterion fights first.
    Optimise,
}

/// Attribute used to rank a team in `BattleMode::Optimise`.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Criterion {
    #[default]
    Health,
    Defence,
    BattlePower,
    Speed,
    Level,
}

/// How a trainer's six team slots get filled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum SelectionMethod {
    #[default]
    Random,
    Manual,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_criterion_names() {
        assert_eq!(Criterion::from_str("battle_power").unwrap(), Criterion::BattlePower);
        assert_eq!(Criterion::Health.to_string(), "health");
        assert!(Criterion::from_str("attack").is_err());
    }

    #[test]
    fn test_battle_mode_names() {
        assert_eq!(BattleMode::from_str("rotate").unwrap(), BattleMode::Rotate);
        assert_eq!(BattleMode::from_str("OPTIMISE").unwrap(), BattleMode::Optimise);
    }
}
