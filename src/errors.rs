//! Errors used throughout the checkers engine.
//!
//! `CheckersError` is the single error type returned by board manipulation,
//! successor generation, search, controllers and configuration loading.
//!
//! Usage guidelines:
//! - `OutOfBounds` and `UnimplementedOperation` indicate programming errors;
//!   correctly bounded move generation never produces them.
//! - `InvalidMove` is recoverable. Human controllers catch it and re-prompt.
//! - `NoLegalMoves` means a search was requested on a finished game. Callers
//!   are expected to check `GameState::is_end_state` first.

use thiserror::Error;

/// Unified error type for the checkers engine.
#[derive(Error, Debug)]
pub enum CheckersError {
    /// Coordinate outside the 8x8 grid.
    #[error("coordinate ({x}, {y}) is outside the 8x8 board")]
    OutOfBounds { x: i8, y: i8 },

    /// A move violated occupancy or ownership rules, or input text did not
    /// match any legal move.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// A trait seam was invoked without a concrete implementation.
    #[error("operation not implemented: {0}")]
    UnimplementedOperation(&'static str),

    /// Search was requested on a state without successors.
    #[error("no legal moves available for the side to move")]
    NoLegalMoves,

    /// Configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias for checkers engine operations.
pub type CheckersResult<T> = Result<T, CheckersError>;
