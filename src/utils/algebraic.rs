//! Coordinate and action-label conversions.
//!
//! Squares are written as a file letter `A..H` followed by a rank `1..8`
//! (for example `A3`). A ply is written as its start square followed by every
//! landing square, joined with dashes: `A3-B4`, `H4-F6-D8`.

use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::board::Board;
use crate::game_state::checkers_types::Coord;

/// Convert a square label (for example "a3" or "A3") to a coordinate.
pub fn algebraic_to_coord(square: &str) -> CheckersResult<Coord> {
    let bytes = square.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(CheckersError::InvalidMove(format!(
            "invalid square: {square}"
        )));
    }

    let file = bytes[0].to_ascii_uppercase();
    let rank = bytes[1];

    if !(b'A'..=b'H').contains(&file) {
        return Err(CheckersError::InvalidMove(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(CheckersError::InvalidMove(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    Ok(Coord::new((file - b'A') as i8, (rank - b'1') as i8))
}

/// Convert a coordinate to its uppercase square label.
pub fn coord_to_algebraic(coord: Coord) -> CheckersResult<String> {
    if !Board::is_in_bounds(coord.x, coord.y) {
        return Err(CheckersError::OutOfBounds {
            x: coord.x,
            y: coord.y,
        });
    }
    Ok(square_label(coord))
}

#[inline]
fn square_label(coord: Coord) -> String {
    let file = char::from(b'A' + coord.x as u8);
    let rank = char::from(b'1' + coord.y as u8);
    format!("{file}{rank}")
}

/// Action label for a ply starting on `from` and landing on each of
/// `landings` in turn. Every coordinate must be on the board.
pub fn format_action(from: Coord, landings: &[Coord]) -> String {
    let mut out = square_label(from);
    for &landing in landings {
        out.push('-');
        out.push_str(&square_label(landing));
    }
    out
}

/// Parse free-text move input such as `a3-b4` or ` H4 - F6 - D8 `.
pub fn parse_action(text: &str) -> CheckersResult<Vec<Coord>> {
    let squares = text
        .split('-')
        .map(algebraic_to_coord)
        .collect::<CheckersResult<Vec<_>>>()?;
    if squares.len() < 2 {
        return Err(CheckersError::InvalidMove(format!(
            "expected <from>-<to>, got: {text}"
        )));
    }
    Ok(squares)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_coord, coord_to_algebraic, format_action, parse_action};
    use crate::errors::CheckersError;
    use crate::game_state::checkers_types::Coord;

    #[test]
    fn square_conversions() {
        assert_eq!(algebraic_to_coord("A1").expect("A1 should parse"), Coord::new(0, 0));
        assert_eq!(algebraic_to_coord("h8").expect("h8 should parse"), Coord::new(7, 7));
        assert_eq!(coord_to_algebraic(Coord::new(0, 2)).expect("in bounds"), "A3");
        assert!(matches!(
            coord_to_algebraic(Coord::new(8, 0)),
            Err(CheckersError::OutOfBounds { .. })
        ));
        assert!(algebraic_to_coord("I1").is_err());
        assert!(algebraic_to_coord("A9").is_err());
    }

    #[test]
    fn multi_jump_label_lists_every_landing() {
        let label = format_action(Coord::new(7, 3), &[Coord::new(5, 5), Coord::new(3, 7)]);
        assert_eq!(label, "H4-F6-D8");
    }

    #[test]
    fn parse_action_is_case_and_space_tolerant() {
        let squares = parse_action(" h4 - F6-d8 ").expect("action should parse");
        assert_eq!(
            squares,
            vec![Coord::new(7, 3), Coord::new(5, 5), Coord::new(3, 7)]
        );
        assert!(parse_action("A3").is_err());
        assert!(parse_action("Quit").is_err());
    }
}
