use crate::battle::state::{BattleEvent, BattleReport, EventBus, GameState};
use crate::errors::{ConfigError, ConfigResult, TeamResult};
use crate::formation::Formation;
use crate::pokemon::PokemonInst;
use crate::species::Roster;
use crate::trainer::Trainer;
use crate::type_chart::TypeChart;
use rand::Rng;
use schema::{BattleMode, Criterion, SelectionMethod};
use std::str::FromStr;

/// One battle between two trainers under a single team discipline.
///
/// The battle borrows both trainers for its whole run. Pokemon are moved out
/// of their formations for each round and moved back (or retired) before the
/// next round starts.
pub struct Battle<'a> {
    trainers: [&'a mut Trainer; 2],
    battle_mode: BattleMode,
    criterion: Criterion,
    chart: &'a TypeChart,
    state: GameState,
    round: u32,
    events: EventBus,
}

impl<'a> Battle<'a> {
    pub fn new(
        first: &'a mut Trainer,
        second: &'a mut Trainer,
        battle_mode: BattleMode,
        criterion: Criterion,
        chart: &'a TypeChart,
    ) -> Self {
        Battle {
            trainers: [first, second],
            battle_mode,
            criterion,
            chart,
            state: GameState::InProgress,
            round: 0,
            events: EventBus::new(),
        }
    }

    /// Like `new`, with the criterion given by name (`"health"`, `"speed"`, ...).
    pub fn with_criterion_name(
        first: &'a mut Trainer,
        second: &'a mut Trainer,
        battle_mode: BattleMode,
        criterion: &str,
        chart: &'a TypeChart,
    ) -> ConfigResult<Self> {
        let criterion = Criterion::from_str(criterion)
            .map_err(|_| ConfigError::UnknownCriterion(criterion.to_string()))?;
        Ok(Self::new(first, second, battle_mode, criterion, chart))
    }

    pub fn battle_mode(&self) -> BattleMode {
        self.battle_mode
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Pick fresh teams for both trainers and assemble them for this battle.
    pub fn create_teams<R: Rng + ?Sized>(
        &mut self,
        method: SelectionMethod,
        roster: &Roster,
        rng: &mut R,
    ) -> TeamResult<()> {
        for trainer in self.trainers.iter_mut() {
            trainer.pick_team(method, roster, rng)?;
        }
        self.assemble_teams();
        Ok(())
    }

    /// Arrange both teams in this battle's discipline.
    pub fn assemble_teams(&mut self) {
        for trainer in self.trainers.iter_mut() {
            trainer.team_mut().assemble(self.battle_mode, self.criterion);
        }
    }

    /// Run rounds until at least one team is out of Pokemon.
    pub fn commence_battle(mut self) -> BattleReport {
        let (battle_mode, criterion) = (self.battle_mode, self.criterion);
        for trainer in self.trainers.iter_mut() {
            trainer.register_team();
            if !is_assembled_for(trainer, battle_mode, criterion) {
                trainer.team_mut().assemble(battle_mode, criterion);
            }
        }

        tracing::info!(
            first = %self.trainers[0].name,
            second = %self.trainers[1].name,
            mode = %self.battle_mode,
            "battle started"
        );

        while !self.trainers[0].team().is_empty() && !self.trainers[1].team().is_empty() {
            self.round += 1;
            self.events.push(BattleEvent::RoundStarted { round: self.round });
            self.fight_round();
            self.events.push(BattleEvent::RoundEnded);
        }

        self.state = match (
            self.trainers[0].team().is_empty(),
            self.trainers[1].team().is_empty(),
        ) {
            (true, true) => GameState::Draw,
            (true, false) => GameState::Player2Win,
            _ => GameState::Player1Win,
        };
        self.events.push(BattleEvent::BattleEnded {
            outcome: self.state,
        });

        tracing::info!(outcome = ?self.state, rounds = self.round, "battle finished");

        BattleReport {
            trainer_names: [self.trainers[0].name.clone(), self.trainers[1].name.clone()],
            outcome: self.state,
            rounds: self.round,
            events: self.events,
        }
    }

    fn fight_round(&mut self) {
        let [first, second] = &mut self.trainers;
        let (Some(mut fighter_a), Some(mut fighter_b)) =
            (first.team_mut().draw(), second.team_mut().draw())
        else {
            unreachable!("a round was started with an empty team");
        };

        for (player_index, pokemon) in [(0, &fighter_a), (1, &fighter_b)] {
            self.events.push(BattleEvent::PokemonSentOut {
                player_index,
                pokemon: pokemon.name.clone(),
                level: pokemon.level,
                health: pokemon.health,
            });
        }

        // Each trainer records the type they are facing.
        if first.register_pokemon(&fighter_b) {
            self.events.push(BattleEvent::TypeRegistered {
                player_index: 0,
                poke_type: fighter_b.poke_type,
            });
        }
        if second.register_pokemon(&fighter_a) {
            self.events.push(BattleEvent::TypeRegistered {
                player_index: 1,
                poke_type: fighter_a.poke_type,
            });
        }

        let completion = [first.pokedex_completion(), second.pokedex_completion()];
        tracing::debug!(
            round = self.round,
            first = %fighter_a.name,
            second = %fighter_b.name,
            completion_a = completion[0],
            completion_b = completion[1],
            "round started"
        );

        let mut exchange = Exchange {
            chart: self.chart,
            completion,
            events: &mut self.events,
        };
        if fighter_a.speed > fighter_b.speed {
            exchange.strike(0, &fighter_a, &mut fighter_b);
            if fighter_b.is_alive() {
                exchange.strike(1, &fighter_b, &mut fighter_a);
            }
        } else if fighter_b.speed > fighter_a.speed {
            exchange.strike(1, &fighter_b, &mut fighter_a);
            if fighter_a.is_alive() {
                exchange.strike(0, &fighter_a, &mut fighter_b);
            }
        } else {
            // Equal speed: both blows land regardless of the first one.
            exchange.strike(0, &fighter_a, &mut fighter_b);
            exchange.strike(1, &fighter_b, &mut fighter_a);
        }

        if fighter_a.is_alive() && fighter_b.is_alive() {
            fighter_a.take_chip_damage();
            fighter_b.take_chip_damage();
            self.events.push(BattleEvent::ChipDamage {
                pokemon: [fighter_a.name.clone(), fighter_b.name.clone()],
            });
        }

        self.requeue([fighter_a, fighter_b]);
    }

    fn requeue(&mut self, fighters: [PokemonInst; 2]) {
        let someone_fainted = fighters.iter().any(|pokemon| !pokemon.is_alive());

        for (player_index, mut pokemon) in fighters.into_iter().enumerate() {
            let team = self.trainers[player_index].team_mut();
            if !pokemon.is_alive() {
                self.events.push(BattleEvent::PokemonFainted {
                    player_index,
                    pokemon: pokemon.name.clone(),
                });
                team.retire(pokemon);
                continue;
            }

            if someone_fainted {
                let evolution = pokemon.level_up();
                self.events.push(BattleEvent::PokemonLevelledUp {
                    player_index,
                    pokemon: pokemon.name.clone(),
                    new_level: pokemon.level,
                });
                if let Some(evolution) = evolution {
                    self.events.push(BattleEvent::PokemonEvolved {
                        player_index,
                        from: evolution.from,
                        to: evolution.to,
                    });
                }
            }

            self.events.push(BattleEvent::PokemonReturned {
                player_index,
                pokemon: pokemon.name.clone(),
            });
            team.give_back(pokemon);
        }
    }
}

fn is_assembled_for(trainer: &Trainer, battle_mode: BattleMode, criterion: Criterion) -> bool {
    match trainer.team().formation() {
        Some(Formation::Ranked(list)) => {
            battle_mode == BattleMode::Optimise && list.criterion() == criterion
        }
        Some(formation) => formation.battle_mode() == battle_mode,
        None => false,
    }
}

/// The attack half of a round: damage scaling and narration.
struct Exchange<'b> {
    chart: &'b TypeChart,
    completion: [f64; 2],
    events: &'b mut EventBus,
}

impl Exchange<'_> {
    fn strike(&mut self, attacker_index: usize, attacker: &PokemonInst, defender: &mut PokemonInst) {
        let damage = scaled_damage(
            attacker.attack(defender, self.chart),
            self.completion[attacker_index],
            self.completion[1 - attacker_index],
        );
        defender.defend(damage);
        self.events.push(BattleEvent::DamageDealt {
            attacker_index,
            attacker: attacker.name.clone(),
            defender: defender.name.clone(),
            damage,
            remaining_health: defender.health,
        });
    }
}

/// Scale raw damage by the ratio of the two trainers' pokedex completion.
///
/// The ratio is taken first so equal completions scale by exactly 1. A
/// defender with an empty pokedex leaves the damage unscaled.
pub fn scaled_damage(raw: f64, attacker_completion: f64, defender_completion: f64) -> f64 {
    if defender_completion > 0.0 {
        (raw * (attacker_completion / defender_completion)).ceil()
    } else {
        raw.ceil()
    }
}
