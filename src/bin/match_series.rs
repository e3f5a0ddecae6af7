//! Standalone AI-vs-AI series runner.
//!
//! Run with:
//! `cargo run --release --bin match_series`
//! `cargo run --release --bin match_series -- --games 20 --p1-depth 4 --p2-algorithm minimax --verbose`

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use plum_checkers::engines::ai_controller::AiController;
use plum_checkers::engines::controller::Controller;
use plum_checkers::game_state::checkers_types::Side;
use plum_checkers::search::search_engine::SearchAlgorithm;
use plum_checkers::utils::config::GameConfig;
use plum_checkers::utils::match_harness::{play_match_series, MatchConfig, MatchSeriesConfig};

/// Play a seeded series of games between two search configurations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML configuration for rules and both players.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 10)]
    games: u16,

    #[arg(long, default_value_t = 1234)]
    seed: u64,

    #[arg(long)]
    p1_depth: Option<u8>,

    #[arg(long)]
    p2_depth: Option<u8>,

    #[arg(long, value_enum)]
    p1_algorithm: Option<SearchAlgorithm>,

    #[arg(long, value_enum)]
    p2_algorithm: Option<SearchAlgorithm>,

    #[arg(long, default_value_t = 2)]
    opening_min_plies: u8,

    #[arg(long, default_value_t = 6)]
    opening_max_plies: u8,

    /// Overrides `max_plies` from the configuration.
    #[arg(long)]
    max_plies: Option<usize>,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).map_err(|e| e.to_string())?,
        None => GameConfig::default(),
    };
    if let Some(depth) = args.p1_depth {
        config.player1.depth = depth;
    }
    if let Some(depth) = args.p2_depth {
        config.player2.depth = depth;
    }
    if let Some(algorithm) = args.p1_algorithm {
        config.player1.algorithm = algorithm;
    }
    if let Some(algorithm) = args.p2_algorithm {
        config.player2.algorithm = algorithm;
    }
    if let Some(max_plies) = args.max_plies {
        config.max_plies = max_plies;
    }
    config.validate().map_err(|e| e.to_string())?;

    let p1_search = config.search_config(Side::Player1);
    let p2_search = config.search_config(Side::Player2);
    println!(
        "player1: {} depth {}  player2: {} depth {}",
        p1_search.algorithm, p1_search.max_depth, p2_search.algorithm, p2_search.max_depth
    );

    let stats = play_match_series(
        || Box::new(AiController::new(p1_search)) as Box<dyn Controller>,
        || Box::new(AiController::new(p2_search)) as Box<dyn Controller>,
        MatchSeriesConfig {
            games: args.games,
            base_seed: args.seed,
            rules: config.rules(),
            per_game: MatchConfig {
                max_plies: config.max_plies,
                opening_min_plies: args.opening_min_plies,
                opening_max_plies: args.opening_max_plies,
            },
            verbose: args.verbose,
        },
    )
    .map_err(|e| e.to_string())?;

    println!("{}", stats.report());
    println!("outcomes: {:?}", stats.outcomes);
    Ok(())
}
