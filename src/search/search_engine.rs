//! Depth-limited minimax and alpha-beta search over `GameState` trees.
//!
//! Values are Player 1 centric: MAX (Player 1) prefers larger utilities, MIN
//! (Player 2) smaller ones. Root children sit at depth 0 and a node at depth
//! `d` is scored with its own utility once `d + 1 >= max_depth` or the game is
//! over. Every visited signature lands in the memo, and the memo size at the
//! end of a call is reported as the number of nodes explored.

use std::fmt;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::MoveGenerator;
use crate::move_generation::successor_generator::LegalSuccessorGenerator;
use crate::search::transposition_table::{
    Bound, MemoEntry, MemoStats, TranspositionTable, TERMINAL_DEPTH,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum SearchAlgorithm {
    #[serde(rename = "minimax", alias = "MiniMax")]
    #[value(name = "minimax")]
    MiniMax,
    #[default]
    #[serde(rename = "alphabeta", alias = "AlphaBeta", alias = "alpha-beta")]
    #[value(name = "alphabeta")]
    AlphaBeta,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::MiniMax => f.write_str("MiniMax"),
            SearchAlgorithm::AlphaBeta => f.write_str("AlphaBeta"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub algorithm: SearchAlgorithm,
    pub max_depth: u8,
    /// Penalise root moves that recreate a board already seen on the path.
    pub avoid_stalemate: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::AlphaBeta,
            max_depth: 2,
            avoid_stalemate: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub chosen: GameState,
    pub value: f64,
    pub nodes_explored: usize,
    pub elapsed: Duration,
    pub memo_stats: MemoStats,
    /// Backed-up value of every root child in generation order, after the
    /// repetition adjustment. Empty when the root had a single child. Under
    /// alpha-beta, moves that could not beat the best so far carry a bound
    /// rather than their exact value.
    pub root_values: Vec<(String, f64)>,
}

/// Pull `value` halfway towards the mover's worst outcome.
#[inline]
pub fn soften_repetition(value: f64, mover_is_max: bool) -> f64 {
    if mover_is_max {
        value + (-1.0 - value) / 2.0
    } else {
        value + (1.0 - value) / 2.0
    }
}

#[inline]
fn classify(value: f64, alpha: f64, beta: f64) -> Bound {
    if value >= beta {
        Bound::Lower
    } else if value <= alpha {
        Bound::Upper
    } else {
        Bound::Exact
    }
}

pub struct SearchEngine<G: MoveGenerator = LegalSuccessorGenerator> {
    config: SearchConfig,
    generator: G,
    memo: TranspositionTable,
    nodes_explored: usize,
    time_elapsed: Duration,
}

impl SearchEngine<LegalSuccessorGenerator> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_generator(config, LegalSuccessorGenerator)
    }
}

impl<G: MoveGenerator> SearchEngine<G> {
    pub fn with_generator(config: SearchConfig, generator: G) -> Self {
        Self {
            config,
            generator,
            memo: TranspositionTable::new(),
            nodes_explored: 0,
            time_elapsed: Duration::ZERO,
        }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Distinct signatures evaluated by the last `select_move` call.
    #[inline]
    pub fn nodes_explored(&self) -> usize {
        self.nodes_explored
    }

    #[inline]
    pub fn time_elapsed(&self) -> Duration {
        self.time_elapsed
    }

    /// Pick the most preferable successor of `state` for the side to move.
    pub fn select_move(&mut self, state: &GameState) -> CheckersResult<SearchResult> {
        let start = Instant::now();
        self.memo.clear();

        if state.is_end_state() {
            return Err(CheckersError::NoLegalMoves);
        }
        let mut children = self.generator.generate_successors(state)?;
        if children.is_empty() {
            return Err(CheckersError::NoLegalMoves);
        }

        let (chosen, value, root_values) = if children.len() == 1 {
            let only = children.swap_remove(0);
            let value = only.utility_value();
            (only, value, Vec::new())
        } else {
            let (index, value, root_values) = match self.config.algorithm {
                SearchAlgorithm::MiniMax => self.minimax_root(state, &children)?,
                SearchAlgorithm::AlphaBeta => self.alpha_beta_root(state, &children)?,
            };
            (children.swap_remove(index), value, root_values)
        };

        self.nodes_explored = self.memo.len();
        let memo_stats = self.memo.stats();
        self.memo.clear();
        self.time_elapsed = start.elapsed();

        debug!(
            algorithm = %self.config.algorithm,
            depth = self.config.max_depth,
            action = chosen.action(),
            utility = value,
            nodes = self.nodes_explored,
            memo_hits = memo_stats.hits,
            elapsed_ms = self.time_elapsed.as_secs_f64() * 1000.0,
            "search complete"
        );

        Ok(SearchResult {
            chosen,
            value,
            nodes_explored: self.nodes_explored,
            elapsed: self.time_elapsed,
            memo_stats,
            root_values,
        })
    }

    fn root_adjusted(&self, child: &GameState, value: f64, mover_is_max: bool) -> f64 {
        if self.config.avoid_stalemate && child.check_path() {
            soften_repetition(value, mover_is_max)
        } else {
            value
        }
    }

    fn minimax_root(
        &mut self,
        state: &GameState,
        children: &[GameState],
    ) -> CheckersResult<(usize, f64, Vec<(String, f64)>)> {
        let max_turn = state.is_max_turn();
        let mut best = (0, if max_turn { f64::NEG_INFINITY } else { f64::INFINITY });
        let mut root_values = Vec::with_capacity(children.len());

        for (index, child) in children.iter().enumerate() {
            let raw = self.minimax(child, 0)?;
            let value = self.root_adjusted(child, raw, max_turn);
            root_values.push((child.action().to_owned(), value));

            let improves = if max_turn { value > best.1 } else { value < best.1 };
            if improves {
                best = (index, value);
            }
        }

        Ok((best.0, best.1, root_values))
    }

    fn alpha_beta_root(
        &mut self,
        state: &GameState,
        children: &[GameState],
    ) -> CheckersResult<(usize, f64, Vec<(String, f64)>)> {
        let max_turn = state.is_max_turn();
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best = (0, if max_turn { alpha } else { beta });
        let mut root_values = Vec::with_capacity(children.len());

        for (index, child) in children.iter().enumerate() {
            let raw = self.alpha_beta(child, alpha, beta, 0)?;
            let value = self.root_adjusted(child, raw, max_turn);
            root_values.push((child.action().to_owned(), value));

            if max_turn && value > best.1 {
                best = (index, value);
                alpha = value;
            } else if !max_turn && value < best.1 {
                best = (index, value);
                beta = value;
            }
        }

        Ok((best.0, best.1, root_values))
    }

    #[inline]
    fn remaining_depth(&self, depth: u8) -> u8 {
        self.config.max_depth.saturating_sub(depth.saturating_add(1))
    }

    /// Own utility of `state` when the search stops here, recorded in the
    /// memo.
    fn leaf_value(&mut self, state: &GameState, remaining: u8) -> Option<f64> {
        let recorded_depth = if state.is_end_state() {
            TERMINAL_DEPTH
        } else if remaining == 0 {
            0
        } else {
            return None;
        };
        let value = state.utility_value();
        self.memo.store(
            state.signature(),
            MemoEntry::exact(value, recorded_depth, state.is_max_turn()),
        );
        Some(value)
    }

    fn minimax(&mut self, state: &GameState, depth: u8) -> CheckersResult<f64> {
        let remaining = self.remaining_depth(depth);
        let max_turn = state.is_max_turn();
        if let Some(value) = self.memo.probe(state.signature()).and_then(|entry| {
            entry.usable_value(remaining, max_turn, f64::NEG_INFINITY, f64::INFINITY)
        }) {
            return Ok(value);
        }
        if let Some(value) = self.leaf_value(state, remaining) {
            return Ok(value);
        }

        let children = self.generator.generate_successors(state)?;
        let mut utility = if max_turn {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for child in &children {
            let value = self.minimax(child, depth + 1)?;
            utility = if max_turn {
                utility.max(value)
            } else {
                utility.min(value)
            };
        }

        self.memo.store(
            state.signature(),
            MemoEntry::exact(utility, remaining, max_turn),
        );
        Ok(utility)
    }

    fn alpha_beta(
        &mut self,
        state: &GameState,
        mut alpha: f64,
        mut beta: f64,
        depth: u8,
    ) -> CheckersResult<f64> {
        let remaining = self.remaining_depth(depth);
        let max_turn = state.is_max_turn();
        if let Some(value) = self
            .memo
            .probe(state.signature())
            .and_then(|entry| entry.usable_value(remaining, max_turn, alpha, beta))
        {
            return Ok(value);
        }
        if let Some(value) = self.leaf_value(state, remaining) {
            return Ok(value);
        }

        let (window_alpha, window_beta) = (alpha, beta);
        let children = self.generator.generate_successors(state)?;
        for child in &children {
            let value = self.alpha_beta(child, alpha, beta, depth + 1)?;
            if max_turn {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        let value = if max_turn { alpha } else { beta };
        self.memo.store(
            state.signature(),
            MemoEntry {
                value,
                bound: classify(value, window_alpha, window_beta),
                remaining_depth: remaining,
                max_turn,
            },
        );
        Ok(value)
    }
}
