//! Plain-text board renderer.
//!
//! The rendered grid doubles as the position signature used for memoization
//! and repetition checks, so its exact layout is part of the engine contract.
//!
//! ```text
//!  8   x   x   x   x
//!  ...
//!  1 o   o   o   o
//!    A B C D E F G H
//! ```

use crate::game_state::board::Board;
use crate::game_state::checkers_rules::BOARD_SIZE;
use crate::game_state::checkers_types::Coord;

/// Render rows 8 down to 1 followed by the file labels. Player 1 is `o`,
/// Player 2 is `x`, kings are uppercase and empty cells are blank.
pub fn render_board(board: &Board) -> String {
    let size = BOARD_SIZE as usize;
    let mut out = String::with_capacity((size + 1) * (2 * size + 3));

    for y in (0..BOARD_SIZE).rev() {
        out.push(' ');
        out.push(char::from(b'1' + y as u8));
        for x in 0..BOARD_SIZE {
            out.push(' ');
            out.push(
                board
                    .piece_at(Coord::new(x, y))
                    .map_or(' ', |(_, piece)| piece.symbol()),
            );
        }
        out.push('\n');
    }

    out.push_str("  ");
    for x in 0..BOARD_SIZE {
        out.push(' ');
        out.push(char::from(b'A' + x as u8));
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::game_state::board::Board;
    use crate::game_state::checkers_rules::Rules;
    use crate::game_state::checkers_types::{Coord, Side};

    const STARTING_GRID: &str = concat!(
        " 8   x   x   x   x\n",
        " 7 x   x   x   x  \n",
        " 6   x   x   x   x\n",
        " 5                \n",
        " 4                \n",
        " 3 o   o   o   o  \n",
        " 2   o   o   o   o\n",
        " 1 o   o   o   o  \n",
        "   A B C D E F G H\n",
    );

    #[test]
    fn starting_board_renders_reference_grid() {
        let board = Board::new(Rules::default());
        assert_eq!(render_board(&board), STARTING_GRID);
        assert_eq!(board.to_string(), STARTING_GRID);
    }

    #[test]
    fn kings_render_uppercase() {
        let mut board = Board::empty(Rules::default());
        board
            .place_piece(Side::Player1, Coord::new(3, 7), false)
            .expect("D8 free");
        board
            .place_piece(Side::Player2, Coord::new(0, 0), true)
            .expect("A1 free");

        let rendered = render_board(&board);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " 8       O        ");
        assert_eq!(lines[7], " 1 X              ");
    }
}
