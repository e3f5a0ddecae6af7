//! Immutable search-tree node.
//!
//! A `GameState` wraps one board snapshot together with the action that
//! produced it and a link into a shared ancestor chain. The chain holds only
//! signatures and action labels behind `Arc`, so extending it per ply is O(1)
//! and boards are never shared between states.

use std::sync::Arc;

use crate::errors::CheckersResult;
use crate::game_state::board::Board;
use crate::game_state::checkers_rules::{Rules, START_ACTION};
use crate::game_state::checkers_types::Side;
use crate::move_generation::move_generator::MoveGenerator;
use crate::move_generation::successor_generator::LegalSuccessorGenerator;

#[derive(Debug)]
struct PathNode {
    signature: String,
    action: String,
    parent: Option<Arc<PathNode>>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    action: String,
    board: Board,
    signature: String,
    captured: usize,
    // Nearest ancestor first.
    path: Option<Arc<PathNode>>,
}

impl GameState {
    /// Root state for a fresh game.
    pub fn new_game(rules: Rules) -> Self {
        Self::from_board(Board::new(rules))
    }

    /// Root state for an arbitrary position.
    pub fn from_board(board: Board) -> Self {
        let signature = board.signature();
        Self {
            action: START_ACTION.to_owned(),
            board,
            signature,
            captured: 0,
            path: None,
        }
    }

    /// Successor produced by one ply. `board` must already have the ply
    /// applied and the turn handed over.
    pub fn child(&self, board: Board, action: String, captured: usize) -> Self {
        let signature = board.signature();
        let path = Arc::new(PathNode {
            signature: self.signature.clone(),
            action: self.action.clone(),
            parent: self.path.clone(),
        });
        Self {
            action,
            board,
            signature,
            captured,
            path: Some(path),
        }
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.board.player_turn()
    }

    /// True when Player 1 (MAX) is to move.
    #[inline]
    pub fn is_max_turn(&self) -> bool {
        self.side_to_move().is_max()
    }

    /// Number of pieces removed by the ply that produced this state.
    #[inline]
    pub fn captured(&self) -> usize {
        self.captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured > 0
    }

    pub fn parent_signature(&self) -> Option<&str> {
        self.path.as_deref().map(|node| node.signature.as_str())
    }

    /// Plies played since the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }

    fn ancestors(&self) -> impl Iterator<Item = &PathNode> {
        std::iter::successors(self.path.as_deref(), |node| node.parent.as_deref())
    }

    /// True when this board already occurred earlier on the path from the
    /// root.
    pub fn check_path(&self) -> bool {
        self.ancestors().any(|node| node.signature == self.signature)
    }

    /// Actions from the root to this state, oldest first.
    pub fn move_history(&self) -> Vec<String> {
        let mut history: Vec<String> = self
            .ancestors()
            .filter(|node| node.parent.is_some())
            .map(|node| node.action.clone())
            .collect();
        history.reverse();
        if self.path.is_some() {
            history.push(self.action.clone());
        }
        history
    }

    /// Winner of the game, if decided. A side with no pieces loses, and so
    /// does a side to move whose pieces are all blocked.
    pub fn winner(&self) -> Option<Side> {
        self.board.winner().or_else(|| {
            let mover = self.side_to_move();
            (!self.board.has_any_move(mover)).then(|| mover.opposite())
        })
    }

    #[inline]
    pub fn is_end_state(&self) -> bool {
        self.winner().is_some()
    }

    /// +1 when Player 1 has won, -1 when Player 2 has won, otherwise the
    /// material difference normalised into `[-1, 1]`.
    pub fn utility_value(&self) -> f64 {
        match self.winner() {
            Some(Side::Player1) => 1.0,
            Some(Side::Player2) => -1.0,
            None => {
                let diff = f64::from(self.board.material(Side::Player1))
                    - f64::from(self.board.material(Side::Player2));
                diff / self.board.rules().max_material()
            }
        }
    }

    /// All legal successors under the standard rules.
    pub fn successors(&self) -> CheckersResult<Vec<GameState>> {
        LegalSuccessorGenerator.generate_successors(self)
    }
}
