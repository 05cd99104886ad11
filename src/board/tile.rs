use std::fmt;

use crate::pieces::piece::Piece;

/// One of the 64 board squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Tile {
    #[inline]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Tile::Occupied(_))
    }

    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Tile::Empty => None,
            Tile::Occupied(piece) => Some(piece),
        }
    }
}

impl From<Option<Piece>> for Tile {
    fn from(piece: Option<Piece>) -> Self {
        piece.map_or(Tile::Empty, Tile::Occupied)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Empty => f.pad("-"),
            Tile::Occupied(piece) => f.pad(&piece.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tile;
    use crate::board::chess_types::{Color, Coord, PieceKind};
    use crate::pieces::piece::Piece;

    #[test]
    fn tile_wraps_an_optional_piece() {
        let rook = Piece::new(PieceKind::Rook, Color::Black, Coord::new(0, 0));
        let occupied = Tile::from(Some(rook));
        assert!(occupied.is_occupied());
        assert_eq!(occupied.piece(), Some(&rook));
        assert_eq!(format!("{occupied:>3}"), "  r");

        let empty = Tile::from(None);
        assert!(!empty.is_occupied());
        assert_eq!(empty, Tile::default());
        assert_eq!(empty.to_string(), "-");
    }
}
