//! Square name conversions.
//!
//! Converts between human-readable squares (e.g., `e4`) and board
//! coordinates, reused by move input and FEN handling.

use crate::board::chess_types::Coord;
use crate::errors::{ChessError, ChessResult};

/// Convert a square name (for example: "e4") to a coordinate.
#[inline]
pub fn square_to_coord(square: &str) -> ChessResult<Coord> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    // Rank 8 is row 0.
    Ok(Coord::new(b'8' - rank, file - b'a'))
}

/// Convert a coordinate to its square name (for example: "e4").
#[inline]
pub fn coord_to_square(coord: Coord) -> String {
    coord.to_string()
}
