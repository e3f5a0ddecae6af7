//! Expansion of a capture into complete multi-jump chains.
//!
//! Under `MultiJumpPolicy::FirstFound` a capture yields a single chain that
//! always takes the first continuation in raw-target order. Under
//! `AllBranches` every distinct path through the available continuations is
//! returned, each on its own board copy.

use tracing::trace;

use crate::errors::CheckersResult;
use crate::game_state::board::Board;
use crate::game_state::checkers_rules::MultiJumpPolicy;
use crate::game_state::checkers_types::{Coord, PieceId};

/// A finished capture sequence for one piece.
#[derive(Debug, Clone)]
pub struct CaptureChain {
    pub board: Board,
    pub landings: Vec<Coord>,
    pub captured: usize,
}

/// Chains that start with `piece` jumping the enemy on `over`. Empty when the
/// first jump is not legal.
pub fn expand_capture_chains(
    board: &Board,
    piece: PieceId,
    over: Coord,
) -> CheckersResult<Vec<CaptureChain>> {
    match board.rules().multi_jump {
        MultiJumpPolicy::FirstFound => {
            let mut next = board.clone();
            let Some(landings) = next.apply_jump(piece, over)? else {
                return Ok(Vec::new());
            };
            Ok(vec![CaptureChain {
                captured: landings.len(),
                board: next,
                landings,
            }])
        }
        MultiJumpPolicy::AllBranches => {
            let mut chains = Vec::new();
            extend_branches(board, piece, over, Vec::new(), &mut chains)?;
            Ok(chains)
        }
    }
}

fn extend_branches(
    board: &Board,
    piece: PieceId,
    over: Coord,
    mut landings: Vec<Coord>,
    out: &mut Vec<CaptureChain>,
) -> CheckersResult<()> {
    let mut next = board.clone();
    let Some(hop) = next.jump_once(piece, over)? else {
        return Ok(());
    };
    landings.push(hop.landing);

    let continuations = if hop.crowned {
        Vec::new()
    } else {
        next.available_jumps(piece)
    };

    if continuations.is_empty() {
        trace!(hops = landings.len(), "capture chain complete");
        out.push(CaptureChain {
            captured: landings.len(),
            board: next,
            landings,
        });
        return Ok(());
    }

    trace!(
        branches = continuations.len(),
        depth = landings.len(),
        "capture chain forks"
    );
    for continuation in continuations {
        extend_branches(&next, piece, continuation, landings.clone(), out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::expand_capture_chains;
    use crate::game_state::board::Board;
    use crate::game_state::checkers_rules::{MultiJumpPolicy, Rules};
    use crate::game_state::checkers_types::{Coord, Side};

    // Player 1 on C1 takes D2, landing on E3, then either D4 (landing C5) or
    // F4 (landing G5).
    fn forked_board(policy: MultiJumpPolicy) -> (Board, usize) {
        let mut board = Board::empty(Rules {
            multi_jump: policy,
            ..Rules::default()
        });
        let mover = board
            .place_piece(Side::Player1, Coord::new(2, 0), false)
            .expect("C1 free");
        for coord in [Coord::new(3, 1), Coord::new(3, 3), Coord::new(5, 3)] {
            board
                .place_piece(Side::Player2, coord, false)
                .expect("square free");
        }
        (board, mover)
    }

    #[test]
    fn first_found_follows_a_single_continuation() {
        let (board, mover) = forked_board(MultiJumpPolicy::FirstFound);
        let chains = expand_capture_chains(&board, mover, Coord::new(3, 1)).expect("chains");

        assert_eq!(chains.len(), 1);
        assert_eq!(
            chains[0].landings,
            vec![Coord::new(4, 2), Coord::new(2, 4)]
        );
        assert_eq!(chains[0].captured, 2);
        assert_eq!(chains[0].board.player(Side::Player2).piece_count(), 1);
    }

    #[test]
    fn all_branches_returns_every_path() {
        let (board, mover) = forked_board(MultiJumpPolicy::AllBranches);
        let chains = expand_capture_chains(&board, mover, Coord::new(3, 1)).expect("chains");

        let landings: Vec<Vec<Coord>> = chains.iter().map(|c| c.landings.clone()).collect();
        assert_eq!(
            landings,
            vec![
                vec![Coord::new(4, 2), Coord::new(2, 4)],
                vec![Coord::new(4, 2), Coord::new(6, 4)],
            ]
        );
        // The source board is untouched.
        assert_eq!(board.player(Side::Player2).piece_count(), 3);
    }

    #[test]
    fn illegal_first_jump_yields_no_chain() {
        let (board, mover) = forked_board(MultiJumpPolicy::FirstFound);
        let chains = expand_capture_chains(&board, mover, Coord::new(1, 1)).expect("chains");
        assert!(chains.is_empty());
    }
}
