use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::game_state::GameState;

/// Produces every state reachable from `game_state` in one ply.
pub trait MoveGenerator: Send + Sync {
    fn generate_successors(&self, game_state: &GameState) -> CheckersResult<Vec<GameState>>;
}

pub struct NullMoveGenerator;

impl MoveGenerator for NullMoveGenerator {
    fn generate_successors(&self, _game_state: &GameState) -> CheckersResult<Vec<GameState>> {
        Err(CheckersError::UnimplementedOperation("successor generation"))
    }
}
