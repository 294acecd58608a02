//! Battle tower runner.
//!
//! Enters one randomly equipped trainer into the tower and fights until the
//! trainer is out of lives or no opponents are left.

use battle_tower::{
    BattleMode, BattleTower, BattleTowerResult, ConfigError, TowerBattle, TowerConfig,
    TowerOutcome, Trainer,
};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Battle Tower - one trainer against a queue of opponents
#[derive(Parser, Debug)]
#[command(name = "battle-tower")]
#[command(about = "Run a battle tower and narrate every battle")]
struct Args {
    /// Tower settings file (RON); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Team discipline: set, rotate or optimise
    #[arg(long)]
    mode: Option<String>,

    /// Ranking attribute for optimise mode (health, defence, battle_power, speed, level)
    #[arg(long)]
    criterion: Option<String>,

    /// Number of opponents in the tower
    #[arg(long)]
    opponents: Option<usize>,

    /// Name of the player's trainer
    #[arg(long, default_value = "Red")]
    name: String,

    /// Only print battle results, not the round-by-round narration
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BattleSummary {
    opponent: String,
    outcome: TowerOutcome,
    rounds: u32,
    my_lives: u32,
    opponent_lives: u32,
    opponent_eliminated: bool,
}

impl From<&TowerBattle> for BattleSummary {
    fn from(battle: &TowerBattle) -> Self {
        BattleSummary {
            opponent: battle.opponent.clone(),
            outcome: battle.outcome,
            rounds: battle.report.rounds,
            my_lives: battle.my_lives,
            opponent_lives: battle.opponent_lives,
            opponent_eliminated: battle.opponent_eliminated,
        }
    }
}

#[derive(Serialize)]
struct TowerSummary {
    trainer: String,
    battle_mode: BattleMode,
    seed: Option<u64>,
    battles: Vec<BattleSummary>,
    enemies_defeated: u32,
    enemies_eliminated: u32,
    lives_left: u32,
    pokedex_completion: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "battle tower aborted");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> BattleTowerResult<TowerConfig> {
    let mut config = match &args.config {
        Some(path) => TowerConfig::load(path)?,
        None => TowerConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = &args.mode {
        config.battle_mode = BattleMode::from_str(mode)
            .map_err(|_| ConfigError::UnknownBattleMode(mode.clone()))?;
    }
    if let Some(criterion) = &args.criterion {
        config.criterion = criterion.clone();
    }
    if let Some(opponents) = args.opponents {
        config.opponents = opponents;
    }
    Ok(config)
}

fn run(args: &Args) -> BattleTowerResult<()> {
    let mut config = load_config(args)?;
    // Pin the seed so a run can be replayed from its summary.
    let seed = *config.seed.get_or_insert_with(rand::random);
    let text = !args.json;

    let mut tower = BattleTower::from_config(&config)?;
    tower.set_my_trainer(Trainer::new(args.name.as_str()))?;
    let opponents = tower.rules().opponents;
    tower.generate_enemy_trainers(opponents)?;

    if text {
        println!("Battle Tower ({} mode, seed {})", config.battle_mode, seed);
        if let Some(trainer) = tower.my_trainer() {
            println!("{} enters with {} lives and this team:", trainer.name, tower.my_lives());
            print!("{}", trainer.team());
        }
        println!();
    }

    let mut battles = Vec::new();
    while let Some(battle) = tower.next_battle() {
        if text {
            if !args.quiet {
                battle
                    .report
                    .events
                    .print_formatted(&battle.report.trainer_names);
            }
            let verdict = match battle.outcome {
                TowerOutcome::Won => "won against",
                TowerOutcome::Lost => "lost to",
                TowerOutcome::Draw => "drew with",
            };
            println!(
                "{} {} {} in {} rounds. Lives left: {} (opponent: {}{})",
                args.name,
                verdict,
                battle.opponent,
                battle.report.rounds,
                battle.my_lives,
                battle.opponent_lives,
                if battle.opponent_eliminated {
                    ", eliminated"
                } else {
                    ""
                }
            );
            println!();
        }
        battles.push(BattleSummary::from(&battle));
    }

    let pokedex_completion = tower
        .my_trainer()
        .map_or(0.0, |trainer| trainer.pokedex_completion());

    if text {
        if let Some(trainer) = tower.my_trainer() {
            println!("{}", trainer);
        }
        println!(
            "Battles won: {}, opponents eliminated: {}",
            tower.enemies_defeated(),
            tower.enemies_eliminated()
        );
    } else {
        let summary = TowerSummary {
            trainer: args.name.clone(),
            battle_mode: config.battle_mode,
            seed: Some(seed),
            battles,
            enemies_defeated: tower.enemies_defeated(),
            enemies_eliminated: tower.enemies_eliminated(),
            lives_left: tower.my_lives(),
            pokedex_completion,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
