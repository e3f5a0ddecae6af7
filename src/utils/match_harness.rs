//! Controller-vs-controller game loop and seeded match series.
//!
//! The same loop drives the interactive binary (through an observer that
//! renders each position) and headless AI-vs-AI series. Every state a
//! controller hands back is checked against the legal successors before it
//! is accepted.

use std::time::Instant;

use chrono::{DateTime, Local};
use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::engines::controller::{Controller, ControllerMetrics};
use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::checkers_rules::Rules;
use crate::game_state::checkers_types::Side;
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Player1Win,
    Player2Win,
    /// The controller for this side stopped playing.
    Quit(Side),
    DrawMaxPlies,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::Player1Win => Some(Side::Player1),
            MatchOutcome::Player2Win => Some(Side::Player2),
            MatchOutcome::Quit(_) | MatchOutcome::DrawMaxPlies => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOutcome {
    Win { player: PlayerId, side: Side },
    Abandoned,
    DrawMaxPlies,
}

#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub max_plies: usize,
    pub opening_min_plies: u8,
    pub opening_max_plies: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_plies: 200,
            opening_min_plies: 2,
            opening_max_plies: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub outcome: MatchOutcome,
    pub final_state: GameState,
    pub started_at: DateTime<Local>,
    pub opening_actions: Vec<String>,
    pub played_actions: Vec<String>,
    pub player1_move_count: u32,
    pub player2_move_count: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
}

#[derive(Debug, Clone)]
pub struct MatchSeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub rules: Rules,
    pub per_game: MatchConfig,
    pub verbose: bool,
}

impl Default for MatchSeriesConfig {
    fn default() -> Self {
        Self {
            games: 9,
            base_seed: 0,
            rules: Rules::default(),
            per_game: MatchConfig::default(),
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MatchSeriesStats {
    pub games: u16,
    pub player1_wins: u16,
    pub player2_wins: u16,
    pub draws: u16,
    pub abandoned: u16,
    pub outcomes: Vec<SeriesOutcome>,
    pub player1_moves: u32,
    pub player2_moves: u32,
    pub player1_total_time_ns: u128,
    pub player2_total_time_ns: u128,
    pub player1_avg_move_time_ms: f64,
    pub player2_avg_move_time_ms: f64,
    pub overall_avg_move_time_ms: f64,
    pub player1_avg_nodes: f64,
    pub player2_avg_nodes: f64,
}

impl MatchSeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} player1_wins={} player2_wins={} draws={} abandoned={} p1_avg_ms={:.3} p2_avg_ms={:.3} overall_avg_ms={:.3} p1_avg_nodes={:.1} p2_avg_nodes={:.1}",
            self.games,
            self.player1_wins,
            self.player2_wins,
            self.draws,
            self.abandoned,
            self.player1_avg_move_time_ms,
            self.player2_avg_move_time_ms,
            self.overall_avg_move_time_ms,
            self.player1_avg_nodes,
            self.player2_avg_nodes
        )
    }
}

/// Play one game from the standard start after a seeded random opening.
/// `player1` moves first.
pub fn play_match(
    player1: &mut dyn Controller,
    player2: &mut dyn Controller,
    rules: Rules,
    seed: u64,
    config: MatchConfig,
) -> CheckersResult<MatchResult> {
    let (start, opening_actions) = apply_seeded_random_opening(
        &GameState::new_game(rules),
        seed,
        config.opening_min_plies,
        config.opening_max_plies,
    )?;
    run_match(start, opening_actions, player1, player2, config, |_| {})
}

/// Play one game from `start` without a random opening.
pub fn play_match_from_state(
    start: GameState,
    player1: &mut dyn Controller,
    player2: &mut dyn Controller,
    config: MatchConfig,
) -> CheckersResult<MatchResult> {
    run_match(start, Vec::new(), player1, player2, config, |_| {})
}

/// Like `play_match_from_state`, calling `observer` with the starting state
/// and again after every accepted ply.
pub fn play_match_with_observer<F>(
    start: GameState,
    player1: &mut dyn Controller,
    player2: &mut dyn Controller,
    config: MatchConfig,
    observer: F,
) -> CheckersResult<MatchResult>
where
    F: FnMut(&GameState),
{
    run_match(start, Vec::new(), player1, player2, config, observer)
}

fn run_match<F>(
    mut state: GameState,
    opening_actions: Vec<String>,
    player1: &mut dyn Controller,
    player2: &mut dyn Controller,
    config: MatchConfig,
    mut observer: F,
) -> CheckersResult<MatchResult>
where
    F: FnMut(&GameState),
{
    let started_at = Local::now();
    player1.new_game();
    player2.new_game();

    let mut played_actions = Vec::<String>::new();
    let mut player1_move_count = 0u32;
    let mut player2_move_count = 0u32;
    let mut player1_total_time_ns = 0u128;
    let mut player2_total_time_ns = 0u128;

    observer(&state);

    let outcome = loop {
        match state.winner() {
            Some(Side::Player1) => break MatchOutcome::Player1Win,
            Some(Side::Player2) => break MatchOutcome::Player2Win,
            None => {}
        }
        if played_actions.len() >= config.max_plies {
            break MatchOutcome::DrawMaxPlies;
        }

        let mover = state.side_to_move();
        let controller: &mut dyn Controller = match mover {
            Side::Player1 => &mut *player1,
            Side::Player2 => &mut *player2,
        };
        let started = Instant::now();
        let next = controller.play_move(&state)?;
        let elapsed_ns = started.elapsed().as_nanos();

        match mover {
            Side::Player1 => {
                player1_move_count = player1_move_count.saturating_add(1);
                player1_total_time_ns = player1_total_time_ns.saturating_add(elapsed_ns);
            }
            Side::Player2 => {
                player2_move_count = player2_move_count.saturating_add(1);
                player2_total_time_ns = player2_total_time_ns.saturating_add(elapsed_ns);
            }
        }

        let Some(next) = next else {
            break MatchOutcome::Quit(mover);
        };
        ensure_legal(&state, &next)?;

        played_actions.push(next.action().to_owned());
        state = next;
        observer(&state);
    };

    info!(
        ?outcome,
        plies = played_actions.len(),
        started_at = %started_at.format("%Y-%m-%d %H:%M:%S"),
        "match finished"
    );

    Ok(MatchResult {
        outcome,
        final_state: state,
        started_at,
        opening_actions,
        played_actions,
        player1_move_count,
        player2_move_count,
        player1_total_time_ns,
        player2_total_time_ns,
    })
}

fn ensure_legal(state: &GameState, next: &GameState) -> CheckersResult<()> {
    let legal = state.successors()?.iter().any(|child| {
        child.action() == next.action() && child.signature() == next.signature()
    });
    if legal && next.parent_signature() == Some(state.signature()) {
        Ok(())
    } else {
        Err(CheckersError::InvalidMove(format!(
            "controller returned illegal move {}",
            next.action()
        )))
    }
}

/// Play a series of games and aggregate win/draw statistics.
///
/// Seats are randomised each game (deterministic from `base_seed`).
pub fn play_match_series<F1, F2>(
    player1_factory: F1,
    player2_factory: F2,
    config: MatchSeriesConfig,
) -> CheckersResult<MatchSeriesStats>
where
    F1: Fn() -> Box<dyn Controller>,
    F2: Fn() -> Box<dyn Controller>,
{
    let mut stats = MatchSeriesStats {
        games: config.games,
        ..MatchSeriesStats::default()
    };
    let mut seat_rng = StdRng::seed_from_u64(config.base_seed ^ 0xA5A5_5A5A_0123_4567);
    let mut player1_node_total = 0.0;
    let mut player2_node_total = 0.0;

    for i in 0..config.games {
        let player1_moves_first = seat_rng.random_bool(0.5);
        let seed = config.base_seed.wrapping_add(u64::from(i));
        if config.verbose {
            let (first, second) = if player1_moves_first {
                ("Player1", "Player2")
            } else {
                ("Player2", "Player1")
            };
            println!(
                "[series] game {}/{} seed={} first={} second={}",
                i + 1,
                config.games,
                seed,
                first,
                second
            );
        }

        let mut p1 = player1_factory();
        let mut p2 = player2_factory();
        let result = if player1_moves_first {
            play_match(p1.as_mut(), p2.as_mut(), config.rules, seed, config.per_game)?
        } else {
            play_match(p2.as_mut(), p1.as_mut(), config.rules, seed, config.per_game)?
        };

        let (p1_seat, p2_seat) = if player1_moves_first {
            (Side::Player1, Side::Player2)
        } else {
            (Side::Player2, Side::Player1)
        };
        let seat_totals = |side: Side| match side {
            Side::Player1 => (result.player1_move_count, result.player1_total_time_ns),
            Side::Player2 => (result.player2_move_count, result.player2_total_time_ns),
        };
        let (moves, time_ns) = seat_totals(p1_seat);
        stats.player1_moves = stats.player1_moves.saturating_add(moves);
        stats.player1_total_time_ns = stats.player1_total_time_ns.saturating_add(time_ns);
        let (moves, time_ns) = seat_totals(p2_seat);
        stats.player2_moves = stats.player2_moves.saturating_add(moves);
        stats.player2_total_time_ns = stats.player2_total_time_ns.saturating_add(time_ns);

        player1_node_total += node_total(p1.metrics());
        player2_node_total += node_total(p2.metrics());

        let mapped = match result.outcome.winner() {
            Some(side) if side == p1_seat => {
                stats.player1_wins += 1;
                SeriesOutcome::Win {
                    player: PlayerId::Player1,
                    side,
                }
            }
            Some(side) => {
                stats.player2_wins += 1;
                SeriesOutcome::Win {
                    player: PlayerId::Player2,
                    side,
                }
            }
            None if result.outcome == MatchOutcome::DrawMaxPlies => {
                stats.draws += 1;
                SeriesOutcome::DrawMaxPlies
            }
            None => {
                stats.abandoned += 1;
                SeriesOutcome::Abandoned
            }
        };
        stats.outcomes.push(mapped);

        if config.verbose {
            println!(
                "[series] game {}/{} result={:?} plies={} p1_wins={} p2_wins={} draws={}\n",
                i + 1,
                config.games,
                mapped,
                result.played_actions.len(),
                stats.player1_wins,
                stats.player2_wins,
                stats.draws
            );
        }
    }

    stats.player1_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player1_total_time_ns, stats.player1_moves);
    stats.player2_avg_move_time_ms =
        avg_ns_per_move_ms(stats.player2_total_time_ns, stats.player2_moves);

    let total_ns = stats
        .player1_total_time_ns
        .saturating_add(stats.player2_total_time_ns);
    let total_moves = stats.player1_moves.saturating_add(stats.player2_moves);
    stats.overall_avg_move_time_ms = avg_ns_per_move_ms(total_ns, total_moves);

    stats.player1_avg_nodes = per_move(player1_node_total, stats.player1_moves);
    stats.player2_avg_nodes = per_move(player2_node_total, stats.player2_moves);

    Ok(stats)
}

#[inline]
fn node_total(metrics: Option<ControllerMetrics>) -> f64 {
    metrics.map_or(0.0, |m| m.average_nodes * m.moves as f64)
}

#[inline]
fn per_move(total: f64, moves: u32) -> f64 {
    if moves == 0 {
        0.0
    } else {
        total / f64::from(moves)
    }
}

#[inline]
fn avg_ns_per_move_ms(total_ns: u128, moves: u32) -> f64 {
    per_move(total_ns as f64, moves) / 1_000_000.0
}

/// Play a seeded number of uniformly random plies from `initial`, stopping
/// early if the game ends.
pub fn apply_seeded_random_opening(
    initial: &GameState,
    seed: u64,
    min_plies: u8,
    max_plies: u8,
) -> CheckersResult<(GameState, Vec<String>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = initial.clone();
    let mut opening_actions = Vec::<String>::new();

    let low = min_plies.min(max_plies);
    let high = max_plies.max(min_plies);
    let target_plies = if low == high {
        low
    } else {
        rng.random_range(low..=high)
    };

    for _ in 0..target_plies {
        if state.is_end_state() {
            break;
        }
        let children = state.successors()?;
        let Some(chosen) = children.choose(&mut rng).cloned() else {
            break;
        };
        opening_actions.push(chosen.action().to_owned());
        state = chosen;
    }

    Ok((state, opening_actions))
}
