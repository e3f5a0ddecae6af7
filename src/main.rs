//! Interactive checkers front end.
//!
//! Run with:
//! `cargo run --release -- --mode human-vs-ai --p2-depth 4`
//! `RUST_LOG=plum_checkers=debug cargo run --release -- --mode ai-vs-ai`

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use plum_checkers::engines::ai_controller::AiController;
use plum_checkers::engines::controller::{seat_label, Controller, ControllerMetrics};
use plum_checkers::engines::human_controller::{HumanController, INPUT_HELP};
use plum_checkers::errors::CheckersResult;
use plum_checkers::game_state::checkers_rules::MultiJumpPolicy;
use plum_checkers::game_state::checkers_types::Side;
use plum_checkers::game_state::game_state::GameState;
use plum_checkers::search::search_engine::SearchAlgorithm;
use plum_checkers::utils::config::GameConfig;
use plum_checkers::utils::match_harness::{play_match_with_observer, MatchConfig, MatchOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    AiVsAi,
    /// The human plays Player 1 and moves first.
    HumanVsAi,
    HumanVsHuman,
}

/// Play checkers against minimax and alpha-beta opponents.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML configuration file. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seats to fill. Asked interactively when omitted.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    #[arg(long)]
    p1_depth: Option<u8>,

    #[arg(long)]
    p2_depth: Option<u8>,

    #[arg(long, value_enum)]
    p1_algorithm: Option<SearchAlgorithm>,

    #[arg(long, value_enum)]
    p2_algorithm: Option<SearchAlgorithm>,

    #[arg(long)]
    king_value: Option<u32>,

    /// Do not penalise moves that repeat an earlier board.
    #[arg(long, default_value_t = false)]
    allow_repetition: bool,

    #[arg(long, value_enum)]
    multi_jump: Option<MultiJumpPolicy>,

    /// Skip per-move and end-of-game AI statistics.
    #[arg(long, default_value_t = false)]
    no_metrics: bool,

    /// Declare a draw after this many plies.
    #[arg(long)]
    max_plies: Option<usize>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig, String> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path).map_err(|e| e.to_string())?,
            None => GameConfig::default(),
        };

        if let Some(depth) = self.p1_depth {
            config.player1.depth = depth;
        }
        if let Some(depth) = self.p2_depth {
            config.player2.depth = depth;
        }
        if let Some(algorithm) = self.p1_algorithm {
            config.player1.algorithm = algorithm;
        }
        if let Some(algorithm) = self.p2_algorithm {
            config.player2.algorithm = algorithm;
        }
        if let Some(king_value) = self.king_value {
            config.king_value = king_value;
        }
        if self.allow_repetition {
            config.avoid_stalemate = false;
        }
        if let Some(policy) = self.multi_jump {
            config.multi_jump = policy;
        }
        if self.no_metrics {
            config.print_metrics = false;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// AI seat that prints a search summary after each of its moves.
struct ReportingAi {
    inner: AiController,
    print_metrics: bool,
}

impl Controller for ReportingAi {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn new_game(&mut self) {
        self.inner.new_game();
    }

    fn play_move(&mut self, game_state: &GameState) -> CheckersResult<Option<GameState>> {
        let next = self.inner.play_move(game_state)?;
        if self.print_metrics {
            if let Some(result) = self.inner.last_result() {
                println!("Utility: {:.3}", result.value);
                println!("Nodes Explored: {}", result.nodes_explored);
                println!("Time Elapsed: {:.3} seconds", result.elapsed.as_secs_f64());
            }
        }
        Ok(next)
    }

    fn metrics(&self) -> Option<ControllerMetrics> {
        self.inner.metrics()
    }
}

fn prompt_mode() -> Result<Mode, String> {
    loop {
        println!("Select a game mode:");
        println!("  1) AI vs AI");
        println!("  2) Human vs AI");
        println!("  3) Human vs Human");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("no game mode selected".to_owned());
        }
        match line.trim() {
            "1" => return Ok(Mode::AiVsAi),
            "2" => return Ok(Mode::HumanVsAi),
            "3" => return Ok(Mode::HumanVsHuman),
            other => println!("Unknown choice '{other}', please enter 1, 2 or 3."),
        }
    }
}

fn seat(config: &GameConfig, side: Side, human: bool) -> Box<dyn Controller> {
    if human {
        Box::new(HumanController::stdio())
    } else {
        Box::new(ReportingAi {
            inner: AiController::new(config.search_config(side)),
            print_metrics: config.print_metrics,
        })
    }
}

fn print_final_metrics(side: Side, controller: &dyn Controller) {
    if let Some(metrics) = controller.metrics() {
        println!(
            "{} [{}]: moves {}, average time {:.3} seconds, average nodes explored {:.1}",
            seat_label(side, controller),
            controller.name(),
            metrics.moves,
            metrics.average_time_secs,
            metrics.average_nodes
        );
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.game_config()?;
    let mode = match cli.mode {
        Some(mode) => mode,
        None => prompt_mode()?,
    };

    let (p1_human, p2_human) = match mode {
        Mode::AiVsAi => (false, false),
        Mode::HumanVsAi => (true, false),
        Mode::HumanVsHuman => (true, true),
    };
    if p1_human || p2_human {
        println!("{INPUT_HELP}");
    }

    let mut player1 = seat(&config, Side::Player1, p1_human);
    let mut player2 = seat(&config, Side::Player2, p2_human);

    let labels = [
        seat_label(Side::Player1, player1.as_ref()),
        seat_label(Side::Player2, player2.as_ref()),
    ];
    let result = play_match_with_observer(
        GameState::new_game(config.rules()),
        player1.as_mut(),
        player2.as_mut(),
        MatchConfig {
            max_plies: config.max_plies,
            ..MatchConfig::default()
        },
        |state| {
            if state.depth() > 0 {
                let mover = state.side_to_move().opposite();
                println!("{} played {}", labels[mover.index()], state.action());
            }
            println!("{}", state.board());
            if !state.is_end_state() {
                println!("{} to move", labels[state.side_to_move().index()]);
            }
        },
    )
    .map_err(|e| e.to_string())?;

    match result.outcome {
        MatchOutcome::Player1Win | MatchOutcome::Player2Win => {
            if let Some(winner) = result.outcome.winner() {
                println!("{} wins!", labels[winner.index()]);
            }
        }
        MatchOutcome::Quit(side) => println!("{} quit the game.", labels[side.index()]),
        MatchOutcome::DrawMaxPlies => {
            println!("Draw: no result after {} plies.", config.max_plies)
        }
    }

    if config.print_metrics {
        print_final_metrics(Side::Player1, player1.as_ref());
        print_final_metrics(Side::Player2, player2.as_ref());
    }
    Ok(())
}
