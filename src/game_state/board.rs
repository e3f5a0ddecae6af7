//! Arena-backed checkers board.
//!
//! The board owns every piece in a flat arena and stores piece indices in a
//! 64-cell array. Players hold ordered index lists. Nothing points back at the
//! board, so `Clone` is a full deep copy and sibling states never alias.

use std::fmt;

use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::checkers_rules::{Rules, BOARD_SIZE, STARTING_ROWS};
use crate::game_state::checkers_types::*;
use crate::utils::algebraic::coord_to_algebraic;
use crate::utils::render_game_state::render_board;

/// Result of a single hop of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub landing: Coord,
    pub captured: PieceId,
    /// The hop ended on the crowning row and promoted the mover.
    pub crowned: bool,
}

#[derive(Debug, Clone)]
pub struct Board {
    cells: [Option<PieceId>; 64],
    pieces: Vec<Piece>,
    players: [Player; 2],
    player_turn: Side,
    rules: Rules,
}

impl Board {
    /// Standard starting position: twelve pieces per side on the playable
    /// squares of each side's three back rows. Player 1 moves first.
    pub fn new(rules: Rules) -> Self {
        let mut board = Self::empty(rules);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if !Self::is_playable(x, y) {
                    continue;
                }
                let side = if y < STARTING_ROWS {
                    Side::Player1
                } else if y >= BOARD_SIZE - STARTING_ROWS {
                    Side::Player2
                } else {
                    continue;
                };
                board.insert_piece(Piece::new(side, Coord::new(x, y)));
            }
        }
        board
    }

    /// Board without pieces, Player 1 to move.
    pub fn empty(rules: Rules) -> Self {
        Self {
            cells: [None; 64],
            pieces: Vec::with_capacity(24),
            players: [Player::new(Side::Player1), Player::new(Side::Player2)],
            player_turn: Side::Player1,
            rules,
        }
    }

    /// Place a piece for a custom position. Uncrowned pieces placed on their
    /// crowning row are promoted immediately.
    pub fn place_piece(&mut self, side: Side, coord: Coord, is_king: bool) -> CheckersResult<PieceId> {
        let idx = Self::cell_index(coord)?;
        if !Self::is_playable(coord.x, coord.y) {
            return Err(CheckersError::InvalidMove(format!(
                "{} is not a playable square",
                coord_to_algebraic(coord)?
            )));
        }
        if self.cells[idx].is_some() {
            return Err(CheckersError::InvalidMove(format!(
                "{} is already occupied",
                coord_to_algebraic(coord)?
            )));
        }

        let mut piece = Piece::new(side, coord);
        piece.is_king = is_king;
        let id = self.insert_piece(piece);
        self.promote_if_crowned(id);
        Ok(id)
    }

    pub fn set_player_turn(&mut self, side: Side) {
        self.player_turn = side;
    }

    #[inline]
    pub const fn is_in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_SIZE && y >= 0 && y < BOARD_SIZE
    }

    #[inline]
    const fn is_playable(x: i8, y: i8) -> bool {
        (x + y) % 2 == 0
    }

    #[inline]
    fn cell_index(coord: Coord) -> CheckersResult<usize> {
        if !Self::is_in_bounds(coord.x, coord.y) {
            return Err(CheckersError::OutOfBounds {
                x: coord.x,
                y: coord.y,
            });
        }
        Ok(coord.y as usize * BOARD_SIZE as usize + coord.x as usize)
    }

    pub fn get_cell(&self, x: i8, y: i8) -> CheckersResult<Position> {
        let coord = Coord::new(x, y);
        let idx = Self::cell_index(coord)?;
        Ok(Position {
            coord,
            occupant: self.cells[idx],
        })
    }

    /// Occupant of `coord`, or `None` when the cell is empty or off the board.
    pub fn piece_at(&self, coord: Coord) -> Option<(PieceId, &Piece)> {
        let idx = Self::cell_index(coord).ok()?;
        self.cells[idx].map(|id| (id, &self.pieces[id]))
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id]
    }

    #[inline]
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    #[inline]
    pub fn current_player(&self) -> &Player {
        self.player(self.player_turn)
    }

    #[inline]
    pub fn player_turn(&self) -> Side {
        self.player_turn
    }

    #[inline]
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Sum of piece values for `side`.
    pub fn material(&self, side: Side) -> u32 {
        self.player(side)
            .pieces
            .iter()
            .map(|&id| self.pieces[id].value(self.rules.king_value))
            .fold(0u32, u32::saturating_add)
    }

    pub fn king_count(&self, side: Side) -> usize {
        self.player(side)
            .pieces
            .iter()
            .filter(|&&id| self.pieces[id].is_king)
            .count()
    }

    /// The side whose opponent has no pieces left.
    pub fn winner(&self) -> Option<Side> {
        if self.player(Side::Player2).pieces.is_empty() {
            Some(Side::Player1)
        } else if self.player(Side::Player1).pieces.is_empty() {
            Some(Side::Player2)
        } else {
            None
        }
    }

    /// Step `piece` onto `dest`. Returns `Ok(false)` without changing the
    /// board when `dest` is occupied.
    pub fn apply_regular_move(&mut self, piece: PieceId, dest: Coord) -> CheckersResult<bool> {
        let idx = Self::cell_index(dest)?;
        if self.cells[idx].is_some() {
            return Ok(false);
        }
        self.relocate(piece, dest)?;
        self.promote_if_crowned(piece);
        Ok(true)
    }

    /// Jump `piece` over the enemy on `over`, capturing it. Returns `Ok(None)`
    /// when `over` holds no enemy or the landing square is off the board or
    /// occupied.
    pub fn jump_once(&mut self, piece: PieceId, over: Coord) -> CheckersResult<Option<Hop>> {
        let from = self.pieces[piece].coord;
        if (over.x - from.x).abs() != 1 || (over.y - from.y).abs() != 1 {
            return Err(CheckersError::InvalidMove(format!(
                "{} is not diagonally adjacent to {}",
                coord_to_algebraic(over)?,
                coord_to_algebraic(from)?
            )));
        }

        let Some(victim) = self.get_cell(over.x, over.y)?.occupant else {
            return Ok(None);
        };
        if self.pieces[victim].side == self.pieces[piece].side {
            return Ok(None);
        }

        let landing = from.jump_landing(over);
        if !Self::is_in_bounds(landing.x, landing.y) || self.piece_at(landing).is_some() {
            return Ok(None);
        }

        self.capture(victim)?;
        self.relocate(piece, landing)?;
        let crowned = self.promote_if_crowned(piece);
        Ok(Some(Hop {
            landing,
            captured: victim,
            crowned,
        }))
    }

    /// Squares holding enemies that `piece` can currently jump, in raw-target
    /// order.
    pub fn available_jumps(&self, piece: PieceId) -> Vec<Coord> {
        let mover = &self.pieces[piece];
        mover
            .raw_targets()
            .into_iter()
            .filter(|&over| self.can_jump(mover, over))
            .collect()
    }

    fn can_jump(&self, mover: &Piece, over: Coord) -> bool {
        let Some((_, target)) = self.piece_at(over) else {
            return false;
        };
        if target.side == mover.side {
            return false;
        }
        let landing = mover.coord.jump_landing(over);
        Self::is_in_bounds(landing.x, landing.y) && self.piece_at(landing).is_none()
    }

    /// Capture over `over`, then keep jumping while the landed piece has a
    /// further jump, always taking the first one in raw-target order. A piece
    /// crowned by a hop stops there. Returns the landing squares in order.
    pub fn apply_jump(&mut self, piece: PieceId, over: Coord) -> CheckersResult<Option<Vec<Coord>>> {
        let Some(first) = self.jump_once(piece, over)? else {
            return Ok(None);
        };

        let mut landings = vec![first.landing];
        let mut crowned = first.crowned;
        while !crowned {
            let Some(next_over) = self.available_jumps(piece).into_iter().next() else {
                break;
            };
            let hop = self.jump_once(piece, next_over)?.ok_or_else(|| {
                CheckersError::InvalidMove("continuation jump could not be applied".to_owned())
            })?;
            landings.push(hop.landing);
            crowned = hop.crowned;
        }

        Ok(Some(landings))
    }

    /// Whether `side` has at least one step or jump available.
    pub fn has_any_move(&self, side: Side) -> bool {
        self.player(side).pieces.iter().any(|&id| {
            let mover = &self.pieces[id];
            mover.raw_targets().into_iter().any(|target| {
                Self::is_in_bounds(target.x, target.y)
                    && (self.piece_at(target).is_none() || self.can_jump(mover, target))
            })
        })
    }

    /// Hand the move to the other side. Called once per completed ply.
    pub fn end_turn(&mut self) {
        self.player_turn = self.player_turn.opposite();
    }

    /// Hashable identity of the position. Same text as the rendered board.
    pub fn signature(&self) -> String {
        render_board(self)
    }

    fn insert_piece(&mut self, piece: Piece) -> PieceId {
        let id = self.pieces.len();
        let side = piece.side;
        let idx = piece.coord.y as usize * BOARD_SIZE as usize + piece.coord.x as usize;
        self.pieces.push(piece);
        self.cells[idx] = Some(id);
        self.players[side.index()].pieces.push(id);
        id
    }

    fn relocate(&mut self, piece: PieceId, dest: Coord) -> CheckersResult<()> {
        let from = Self::cell_index(self.pieces[piece].coord)?;
        let to = Self::cell_index(dest)?;
        self.cells[from] = None;
        self.cells[to] = Some(piece);
        self.pieces[piece].coord = dest;
        Ok(())
    }

    fn capture(&mut self, victim: PieceId) -> CheckersResult<()> {
        let (side, coord) = {
            let p = &self.pieces[victim];
            (p.side, p.coord)
        };
        self.players[side.index()].pieces.retain(|&id| id != victim);
        let idx = Self::cell_index(coord)?;
        self.cells[idx] = None;
        Ok(())
    }

    fn promote_if_crowned(&mut self, piece: PieceId) -> bool {
        let p = &mut self.pieces[piece];
        if !p.is_king && p.coord.y == p.direction.crowning_row() {
            p.is_king = true;
            return true;
        }
        false
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::errors::CheckersError;
    use crate::game_state::checkers_rules::Rules;
    use crate::game_state::checkers_types::{Coord, Side};

    #[test]
    fn starting_position_has_twelve_pieces_per_side_on_playable_squares() {
        let board = Board::new(Rules::default());
        for side in [Side::Player1, Side::Player2] {
            assert_eq!(board.player(side).piece_count(), 12);
            for &id in &board.player(side).pieces {
                let piece = board.piece(id);
                assert_eq!((piece.coord.x + piece.coord.y) % 2, 0);
                match side {
                    Side::Player1 => assert!(piece.coord.y <= 2),
                    Side::Player2 => assert!(piece.coord.y >= 5),
                }
                let cell = board
                    .get_cell(piece.coord.x, piece.coord.y)
                    .expect("piece coordinate should be in bounds");
                assert_eq!(cell.occupant, Some(id));
            }
        }
        assert_eq!(board.player_turn(), Side::Player1);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn get_cell_rejects_out_of_bounds() {
        let board = Board::new(Rules::default());
        assert!(Board::is_in_bounds(7, 0));
        assert!(!Board::is_in_bounds(8, 0));
        assert!(!Board::is_in_bounds(0, -1));
        assert!(matches!(
            board.get_cell(8, 3),
            Err(CheckersError::OutOfBounds { x: 8, y: 3 })
        ));
    }

    #[test]
    fn regular_move_refuses_occupied_destination() {
        let mut board = Board::new(Rules::default());
        let (a1, _) = board.piece_at(Coord::new(0, 0)).expect("A1 occupied");
        assert!(!board
            .apply_regular_move(a1, Coord::new(1, 1))
            .expect("B2 is in bounds"));

        let (a3, _) = board.piece_at(Coord::new(0, 2)).expect("A3 occupied");
        assert!(board
            .apply_regular_move(a3, Coord::new(1, 3))
            .expect("B4 is in bounds"));
        assert!(board.piece_at(Coord::new(0, 2)).is_none());
        assert_eq!(board.piece(a3).coord, Coord::new(1, 3));
    }

    #[test]
    fn jump_captures_and_chains_through_second_enemy() {
        let mut board = Board::empty(Rules::default());
        let mover = board
            .place_piece(Side::Player1, Coord::new(2, 2), false)
            .expect("C3 free");
        board
            .place_piece(Side::Player2, Coord::new(3, 3), false)
            .expect("D4 free");
        board
            .place_piece(Side::Player2, Coord::new(5, 5), false)
            .expect("F6 free");

        let landings = board
            .apply_jump(mover, Coord::new(3, 3))
            .expect("jump should apply")
            .expect("jump should be legal");
        assert_eq!(landings, vec![Coord::new(4, 4), Coord::new(6, 6)]);
        assert_eq!(board.player(Side::Player2).piece_count(), 0);
        assert_eq!(board.winner(), Some(Side::Player1));
    }

    #[test]
    fn jump_fails_when_landing_is_blocked_or_off_board() {
        let mut board = Board::empty(Rules::default());
        let mover = board
            .place_piece(Side::Player1, Coord::new(1, 1), false)
            .expect("B2 free");
        board
            .place_piece(Side::Player2, Coord::new(0, 2), false)
            .expect("A3 free");
        board
            .place_piece(Side::Player2, Coord::new(2, 2), false)
            .expect("C3 free");
        board
            .place_piece(Side::Player2, Coord::new(3, 3), false)
            .expect("D4 free");

        assert_eq!(board.apply_jump(mover, Coord::new(0, 2)).expect("in bounds"), None);
        assert_eq!(board.apply_jump(mover, Coord::new(2, 2)).expect("in bounds"), None);
        assert_eq!(board.player(Side::Player2).piece_count(), 3);
    }

    #[test]
    fn reaching_the_back_rank_promotes_and_doubles_value() {
        let mut board = Board::empty(Rules::default());
        let mover = board
            .place_piece(Side::Player1, Coord::new(0, 6), false)
            .expect("A7 free");
        board
            .place_piece(Side::Player2, Coord::new(6, 6), false)
            .expect("G7 free");
        assert_eq!(board.material(Side::Player1), 1);

        assert!(board
            .apply_regular_move(mover, Coord::new(1, 7))
            .expect("B8 in bounds"));
        assert!(board.piece(mover).is_king);
        assert_eq!(board.material(Side::Player1), 2);
        assert_eq!(board.king_count(Side::Player1), 1);
    }

    #[test]
    fn blocked_side_has_no_moves() {
        let mut board = Board::empty(Rules::default());
        board
            .place_piece(Side::Player1, Coord::new(0, 0), false)
            .expect("A1 free");
        board
            .place_piece(Side::Player2, Coord::new(1, 1), false)
            .expect("B2 free");
        board
            .place_piece(Side::Player2, Coord::new(2, 2), false)
            .expect("C3 free");

        assert!(!board.has_any_move(Side::Player1));
        assert!(board.has_any_move(Side::Player2));
    }

    #[test]
    fn place_piece_rejects_light_squares_and_duplicates() {
        let mut board = Board::empty(Rules::default());
        assert!(matches!(
            board.place_piece(Side::Player1, Coord::new(1, 0), false),
            Err(CheckersError::InvalidMove(_))
        ));
        board
            .place_piece(Side::Player1, Coord::new(0, 0), false)
            .expect("A1 free");
        assert!(matches!(
            board.place_piece(Side::Player2, Coord::new(0, 0), false),
            Err(CheckersError::InvalidMove(_))
        ));
    }
}
