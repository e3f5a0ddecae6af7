//! Canonical checkers rule constants and the per-game rule set.
//!
//! `Rules` is passed into `Board::new` and copied into every derived board,
//! so no rule value is ever read from global state.

use serde::Deserialize;

/// Width and height of the board.
pub const BOARD_SIZE: i8 = 8;

/// Pieces each side starts with.
pub const PIECES_PER_SIDE: u32 = 12;

/// Rows (from each side's own back rank) filled at the start of a game.
pub const STARTING_ROWS: i8 = 3;

/// Value of a crowned piece unless configured otherwise.
pub const DEFAULT_KING_VALUE: u32 = 2;

/// Largest accepted king value.
pub const MAX_KING_VALUE: u32 = 1000;

/// Action label carried by root states.
pub const START_ACTION: &str = "START";

/// How a capture chain proceeds when a landing square offers more than one
/// further jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MultiJumpPolicy {
    /// Follow the first continuation in raw-target order. One chain per
    /// initial capture.
    #[default]
    FirstFound,
    /// Every distinct chain becomes its own successor.
    AllBranches,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub king_value: u32,
    pub multi_jump: MultiJumpPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            king_value: DEFAULT_KING_VALUE,
            multi_jump: MultiJumpPolicy::FirstFound,
        }
    }
}

impl Rules {
    /// Largest possible material difference: a full side of kings against
    /// nothing. Normalises utility values into `[-1, 1]`.
    #[inline]
    pub fn max_material(&self) -> f64 {
        f64::from(PIECES_PER_SIDE) * f64::from(self.king_value.max(1))
    }
}
