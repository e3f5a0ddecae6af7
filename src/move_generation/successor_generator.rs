//! Legal successor generation.
//!
//! Captures are generated first across every piece of the side to move. If
//! any exist they are the only legal plies; otherwise every in-bounds step onto
//! an empty square is returned. Each successor owns a fresh copy of the board.

use crate::errors::CheckersResult;
use crate::game_state::board::Board;
use crate::game_state::game_state::GameState;
use crate::move_generation::capture_chains::expand_capture_chains;
use crate::move_generation::move_generator::MoveGenerator;
use crate::utils::algebraic::format_action;

pub struct LegalSuccessorGenerator;

impl MoveGenerator for LegalSuccessorGenerator {
    fn generate_successors(&self, game_state: &GameState) -> CheckersResult<Vec<GameState>> {
        let captures = generate_capture_successors(game_state)?;
        if !captures.is_empty() {
            return Ok(captures);
        }
        generate_step_successors(game_state)
    }
}

/// Every complete capture sequence available to the side to move.
pub fn generate_capture_successors(game_state: &GameState) -> CheckersResult<Vec<GameState>> {
    let board = game_state.board();
    let mut out = Vec::new();

    for &id in &board.current_player().pieces {
        let from = board.piece(id).coord;
        for over in board.available_jumps(id) {
            for chain in expand_capture_chains(board, id, over)? {
                let mut next = chain.board;
                next.end_turn();
                out.push(game_state.child(
                    next,
                    format_action(from, &chain.landings),
                    chain.captured,
                ));
            }
        }
    }

    Ok(out)
}

/// Every non-capturing diagonal step available to the side to move.
pub fn generate_step_successors(game_state: &GameState) -> CheckersResult<Vec<GameState>> {
    let board = game_state.board();
    let mut out = Vec::new();

    for &id in &board.current_player().pieces {
        let piece = board.piece(id);
        for target in piece.raw_targets() {
            if !Board::is_in_bounds(target.x, target.y)
                || !board.get_cell(target.x, target.y)?.is_empty()
            {
                continue;
            }

            let mut next = board.clone();
            if next.apply_regular_move(id, target)? {
                next.end_turn();
                out.push(game_state.child(next, format_action(piece.coord, &[target]), 0));
            }
        }
    }

    Ok(out)
}
