//! Core value types shared by the board, successor generation and search.
//!
//! Pieces live in an arena owned by the board and are referenced by
//! `PieceId`; cells and players only ever hold indices, never references.

pub use crate::game_state::board::Board;
pub use crate::game_state::game_state::GameState;

use crate::game_state::checkers_rules::BOARD_SIZE;

/// Index of a piece inside its board's arena.
pub type PieceId = usize;

/// One of the two sides. `Player1` is MAX, moves first and plays upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Player1 => 0,
            Side::Player2 => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    #[inline]
    pub const fn is_max(self) -> bool {
        matches!(self, Side::Player1)
    }

    /// Direction of travel for this side's uncrowned pieces.
    #[inline]
    pub const fn forward(self) -> Direction {
        match self {
            Side::Player1 => Direction::Up,
            Side::Player2 => Direction::Down,
        }
    }

    /// Lowercase board symbol used for this side's normal pieces.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Side::Player1 => 'o',
            Side::Player2 => 'x',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Side::Player1 => "Player 1",
            Side::Player2 => "Player 2",
        }
    }
}

/// Forward direction of an uncrowned piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    #[inline]
    pub const fn dy(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    /// Row on which a piece travelling in this direction is crowned.
    #[inline]
    pub const fn crowning_row(self) -> i8 {
        match self {
            Direction::Up => BOARD_SIZE - 1,
            Direction::Down => 0,
        }
    }
}

/// Board coordinate. `x` is the column (`A..H`), `y` the row (`1..8`), both
/// zero-based. May point off the board; use `Board::is_in_bounds` to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    #[inline]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Reflection of `over` through `self`: where a piece on `self` lands
    /// after jumping the piece on `over`.
    #[inline]
    pub const fn jump_landing(self, over: Coord) -> Self {
        Self {
            x: self.x + 2 * (over.x - self.x),
            y: self.y + 2 * (over.y - self.y),
        }
    }
}

/// A checkers piece. Its coordinate always mirrors the board cell holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub direction: Direction,
    pub is_king: bool,
    pub coord: Coord,
}

impl Piece {
    pub fn new(side: Side, coord: Coord) -> Self {
        Self {
            side,
            direction: side.forward(),
            is_king: false,
            coord,
        }
    }

    #[inline]
    pub const fn value(&self, king_value: u32) -> u32 {
        if self.is_king {
            king_value
        } else {
            1
        }
    }

    /// Diagonal neighbours this piece could step to, ignoring board limits
    /// and occupancy.
    pub fn raw_targets(&self) -> Vec<Coord> {
        let c = self.coord;
        if self.is_king {
            vec![
                c.offset(-1, -1),
                c.offset(-1, 1),
                c.offset(1, -1),
                c.offset(1, 1),
            ]
        } else {
            let dy = self.direction.dy();
            vec![c.offset(-1, dy), c.offset(1, dy)]
        }
    }

    pub fn symbol(&self) -> char {
        let ch = self.side.symbol();
        if self.is_king {
            ch.to_ascii_uppercase()
        } else {
            ch
        }
    }
}

/// Ordered list of one side's live pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub side: Side,
    pub pieces: Vec<PieceId>,
}

impl Player {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            pieces: Vec::with_capacity(12),
        }
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}

/// View of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub coord: Coord,
    pub occupant: Option<PieceId>,
}

impl Position {
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}
