use crate::battle::engine::Battle;
use crate::battle::state::{BattleReport, GameState};
use crate::config::{TowerConfig, TowerRules};
use crate::errors::{BattleTowerResult, TeamResult};
use crate::species::Roster;
use crate::trainer::Trainer;
use crate::type_chart::TypeChart;
use rand::rngs::StdRng;
use rand::Rng;
use schema::SelectionMethod;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An opponent waiting in the tower queue.
#[derive(Debug, Clone)]
pub struct Challenger {
    pub trainer: Trainer,
    pub lives: u32,
    /// Battles already fought against the player.
    pub bouts: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TowerOutcome {
    Won,
    Lost,
    Draw,
}

/// Result of one tower battle, from the player's side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TowerBattle {
    pub outcome: TowerOutcome,
    pub opponent: String,
    pub my_lives: u32,
    pub opponent_lives: u32,
    pub opponent_eliminated: bool,
    pub report: BattleReport,
}

/// One player trainer against a rotating queue of opponents, each with its
/// own life count.
pub struct BattleTower<R: Rng = StdRng> {
    rules: TowerRules,
    roster: Roster,
    chart: TypeChart,
    rng: R,
    my_trainer: Option<Trainer>,
    my_lives: u32,
    enemies: VecDeque<Challenger>,
    wins: u32,
    eliminated: u32,
}

impl BattleTower<StdRng> {
    /// Build a tower from validated settings and the data files they name.
    pub fn from_config(config: &TowerConfig) -> BattleTowerResult<Self> {
        let rules = config.rules()?;
        let roster = config.load_roster()?;
        let chart = config.load_type_chart()?;
        Ok(BattleTower::new(rules, roster, chart, config.rng()))
    }
}

impl<R: Rng> BattleTower<R> {
    pub fn new(rules: TowerRules, roster: Roster, chart: TypeChart, rng: R) -> Self {
        BattleTower {
            rules,
            roster,
            chart,
            rng,
            my_trainer: None,
            my_lives: 0,
            enemies: VecDeque::new(),
            wins: 0,
            eliminated: 0,
        }
    }

    pub fn rules(&self) -> &TowerRules {
        &self.rules
    }

    fn roll_lives(&mut self) -> u32 {
        self.rng
            .random_range(self.rules.min_lives..=self.rules.max_lives)
    }

    /// Enter the player's trainer. A trainer without a team gets a random one.
    pub fn set_my_trainer(&mut self, mut trainer: Trainer) -> TeamResult<()> {
        if trainer.team().team_count() == 0 {
            trainer.pick_team(SelectionMethod::Random, &self.roster, &mut self.rng)?;
        }
        trainer
            .team_mut()
            .assemble(self.rules.battle_mode, self.rules.criterion);
        self.my_lives = self.roll_lives();
        tracing::info!(trainer = %trainer.name, lives = self.my_lives, "player entered the tower");
        self.my_trainer = Some(trainer);
        Ok(())
    }

    /// Queue up an opponent with a freshly rolled life count.
    pub fn add_enemy_trainer(&mut self, mut trainer: Trainer) {
        trainer
            .team_mut()
            .assemble(self.rules.battle_mode, self.rules.criterion);
        let lives = self.roll_lives();
        tracing::debug!(trainer = %trainer.name, lives, "opponent queued");
        self.enemies.push_back(Challenger {
            trainer,
            lives,
            bouts: 0,
        });
    }

    /// Replace the opponent queue with `count` trainers named "Trainer 1",
    /// "Trainer 2", ... each with a random team.
    pub fn generate_enemy_trainers(&mut self, count: usize) -> TeamResult<()> {
        self.enemies.clear();
        for i in 1..=count {
            let mut trainer = Trainer::new(format!("Trainer {}", i));
            trainer.pick_team(SelectionMethod::Random, &self.roster, &mut self.rng)?;
            self.add_enemy_trainer(trainer);
        }
        Ok(())
    }

    pub fn battles_remaining(&self) -> bool {
        self.my_trainer.is_some() && self.my_lives > 0 && !self.enemies.is_empty()
    }

    /// Fight the opponent at the front of the queue.
    ///
    /// Both teams are restored to their recorded health first. The opponent
    /// rejoins the back of the queue while it has lives left.
    pub fn next_battle(&mut self) -> Option<TowerBattle> {
        if !self.battles_remaining() {
            return None;
        }
        let my_trainer = self.my_trainer.as_mut()?;
        let mut challenger = self.enemies.pop_front()?;
        let (battle_mode, criterion) = (self.rules.battle_mode, self.rules.criterion);

        my_trainer.team_mut().regenerate(battle_mode, criterion);
        challenger.trainer.team_mut().regenerate(battle_mode, criterion);
        if self.rules.toggle_rematches && challenger.bouts > 0 {
            challenger.trainer.team_mut().toggle();
        }

        let report = Battle::new(
            my_trainer,
            &mut challenger.trainer,
            battle_mode,
            criterion,
            &self.chart,
        )
        .commence_battle();
        challenger.bouts += 1;

        let outcome = match report.outcome {
            GameState::Player1Win => {
                challenger.lives -= 1;
                self.wins += 1;
                TowerOutcome::Won
            }
            GameState::Player2Win => {
                self.my_lives -= 1;
                TowerOutcome::Lost
            }
            GameState::Draw => {
                self.my_lives -= 1;
                challenger.lives -= 1;
                self.wins += 1;
                TowerOutcome::Draw
            }
            GameState::InProgress => unreachable!("a finished battle is never in progress"),
        };

        let opponent = challenger.trainer.name.clone();
        let opponent_lives = challenger.lives;
        let opponent_eliminated = opponent_lives == 0;
        if opponent_eliminated {
            self.eliminated += 1;
        } else {
            self.enemies.push_back(challenger);
        }

        tracing::info!(
            opponent = %opponent,
            outcome = ?outcome,
            my_lives = self.my_lives,
            opponent_lives,
            "tower battle finished"
        );

        Some(TowerBattle {
            outcome,
            opponent,
            my_lives: self.my_lives,
            opponent_lives,
            opponent_eliminated,
            report,
        })
    }

    /// Battles won by the player; draws count as wins.
    pub fn enemies_defeated(&self) -> u32 {
        self.wins
    }

    /// Opponents that have run out of lives.
    pub fn enemies_eliminated(&self) -> u32 {
        self.eliminated
    }

    pub fn my_lives(&self) -> u32 {
        self.my_lives
    }

    pub fn my_trainer(&self) -> Option<&Trainer> {
        self.my_trainer.as_ref()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Challenger> {
        self.enemies.iter()
    }
}
