use thiserror::Error;

/// Main error type for the Battle Tower simulator
#[derive(Debug, Error)]
pub enum BattleTowerError {
    /// Error in configuration or external data (fatal to the caller)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Error while selecting or assembling a team
    #[error("Team error: {0}")]
    Team(#[from] TeamError),
    /// Run summary could not be serialized
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors raised while loading or validating configuration and data files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Ranking criterion name is not one of the known criteria
    #[error("Invalid criterion: '{0}'")]
    UnknownCriterion(String),
    /// Battle mode name is not one of the known modes
    #[error("Invalid battle mode: '{0}'")]
    UnknownBattleMode(String),
    /// A type name in the effectiveness table is not a known type
    #[error("Unknown type in effectiveness table: '{0}'")]
    UnknownType(String),
    /// A known type is missing from the effectiveness table
    #[error("Type {0} is missing from the effectiveness table")]
    MissingType(String),
    /// Effectiveness table is structurally broken
    #[error("Malformed effectiveness table: {0}")]
    MalformedTypeChart(String),
    /// Species roster is structurally broken
    #[error("Malformed roster: {0}")]
    MalformedRoster(String),
    /// Tower settings are inconsistent
    #[error("Invalid tower settings: {0}")]
    InvalidTower(String),
    /// Data file could not be read
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Data file could not be parsed
    #[error("Failed to parse RON data: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Errors related to team selection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TeamError {
    /// Roster index is out of bounds
    #[error("Invalid roster selection {index}: choose between 1 and {roster_size}")]
    InvalidSelection { index: usize, roster_size: usize },
    /// More creatures were requested than a team can hold
    #[error("A team holds at most {limit} Pokemon, {requested} were selected")]
    TooManySelected { requested: usize, limit: usize },
    /// No creatures were selected
    #[error("A team needs at least one Pokemon")]
    EmptySelection,
    /// Manual selection needs an interactive front end
    #[error("Manual selection requires explicit roster indices")]
    ManualSelectionUnavailable,
}

/// Type alias for Results using BattleTowerError
pub type BattleTowerResult<T> = Result<T, BattleTowerError>;

/// Type alias for Results using ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Type alias for Results using TeamError
pub type TeamResult<T> = Result<T, TeamError>;

impl ConfigError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: BattleTowerError = ConfigError::UnknownCriterion("attack".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid criterion: 'attack'"
        );

        let err: BattleTowerError = TeamError::InvalidSelection {
            index: 0,
            roster_size: 30,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Team error: Invalid roster selection 0: choose between 1 and 30"
        );
    }
}
