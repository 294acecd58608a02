//! Tower settings and the data files they point at.

use crate::errors::{ConfigError, ConfigResult};
use crate::species::Roster;
use crate::type_chart::TypeChart;
use rand::rngs::StdRng;
use rand::SeedableRng;
use schema::{BattleMode, Criterion, SelectionMethod};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings for a battle tower run, usually read from a RON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Seed for team generation and life counts. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub battle_mode: BattleMode,
    /// Ranking attribute name, only consulted in `Optimise` mode.
    pub criterion: String,
    pub selection: SelectionMethod,
    pub opponents: usize,
    pub min_lives: u32,
    pub max_lives: u32,
    /// Toggle an opponent's formation each time it comes back for a rematch.
    pub toggle_rematches: bool,
    /// Species roster; the bundled one when unset.
    pub roster_path: Option<PathBuf>,
    /// Type effectiveness CSV; the bundled one when unset.
    pub type_chart_path: Option<PathBuf>,
}

impl Default for TowerConfig {
    fn default() -> Self {
        TowerConfig {
            seed: None,
            battle_mode: BattleMode::Rotate,
            criterion: Criterion::Health.to_string(),
            selection: SelectionMethod::Random,
            opponents: 3,
            min_lives: 1,
            max_lives: 3,
            toggle_rematches: false,
            roster_path: None,
            type_chart_path: None,
        }
    }
}

/// Validated, typed view of a `TowerConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerRules {
    pub battle_mode: BattleMode,
    pub criterion: Criterion,
    pub opponents: usize,
    pub min_lives: u32,
    pub max_lives: u32,
    pub toggle_rematches: bool,
}

impl Default for TowerRules {
    fn default() -> Self {
        TowerRules {
            battle_mode: BattleMode::Rotate,
            criterion: Criterion::Health,
            opponents: 3,
            min_lives: 1,
            max_lives: 3,
            toggle_rematches: false,
        }
    }
}

impl TowerConfig {
    /// Read settings from a RON file. Data paths inside it are taken relative
    /// to the file's directory.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut config = Self::from_ron_str(&content)?;
        if let Some(base) = path.parent() {
            for data_path in [&mut config.roster_path, &mut config.type_chart_path]
                .into_iter()
                .flatten()
            {
                if data_path.is_relative() {
                    *data_path = base.join(&*data_path);
                }
            }
        }
        tracing::debug!(path = %path.display(), "loaded tower config");
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> ConfigResult<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Check the settings and resolve names into typed values.
    pub fn rules(&self) -> ConfigResult<TowerRules> {
        let criterion = Criterion::from_str(self.criterion.trim())
            .map_err(|_| ConfigError::UnknownCriterion(self.criterion.clone()))?;

        if self.min_lives == 0 {
            return Err(ConfigError::InvalidTower(
                "every trainer needs at least one life".to_string(),
            ));
        }
        if self.min_lives > self.max_lives {
            return Err(ConfigError::InvalidTower(format!(
                "min_lives ({}) is greater than max_lives ({})",
                self.min_lives, self.max_lives
            )));
        }
        if self.opponents == 0 {
            return Err(ConfigError::InvalidTower(
                "the tower needs at least one opponent".to_string(),
            ));
        }
        if self.selection != SelectionMethod::Random {
            return Err(ConfigError::InvalidTower(format!(
                "{} selection is not available in the tower",
                self.selection
            )));
        }

        Ok(TowerRules {
            battle_mode: self.battle_mode,
            criterion,
            opponents: self.opponents,
            min_lives: self.min_lives,
            max_lives: self.max_lives,
            toggle_rematches: self.toggle_rematches,
        })
    }

    pub fn load_roster(&self) -> ConfigResult<Roster> {
        match &self.roster_path {
            Some(path) => Roster::from_path(path),
            None => Roster::standard(),
        }
    }

    pub fn load_type_chart(&self) -> ConfigResult<TypeChart> {
        match &self.type_chart_path {
            Some(path) => TypeChart::from_path(path),
            None => TypeChart::standard(),
        }
    }

    /// The random source for a run: seeded when a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
