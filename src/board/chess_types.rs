//! Core value types shared by the board, move and search layers.
//!
//! Coordinates follow the display orientation: rank 0 is Black's back rank
//! (drawn at the top), rank 7 is White's back rank. White pawns therefore
//! advance towards lower rank indices.

use std::fmt;

use crate::board::chess_rules::{NUM_FILES, NUM_RANKS};

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn is_promotion_rank(self, rank: u8) -> bool {
        match self {
            Color::White => rank == 0,
            Color::Black => rank == 7,
        }
    }

    #[inline]
    pub const fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Single-letter tag used in logs and debug output.
    #[inline]
    pub const fn tag(self) -> &'static str {
        match self {
            Color::White => "W",
            Color::Black => "B",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns. The king value only needs to dominate
    /// every other term while keeping i32 ordering arithmetic overflow free.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 350,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10_000,
        }
    }

    /// Uppercase letter as used in FEN and move notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::letter`].
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A square on the board, addressed by rank (row from the top) and file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub rank: u8,
    pub file: u8,
}

impl Coord {
    #[inline]
    pub const fn new(rank: u8, file: u8) -> Self {
        Coord { rank, file }
    }

    /// Builds a coordinate from signed components, rejecting anything off the board.
    #[inline]
    pub fn try_new(rank: i8, file: i8) -> Option<Self> {
        if (0..NUM_RANKS as i8).contains(&rank) && (0..NUM_FILES as i8).contains(&file) {
            Some(Coord::new(rank as u8, file as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Self> {
        Coord::try_new(self.rank as i8 + d_rank, self.file as i8 + d_file)
    }

    /// Row-major tile index in `0..64`.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * NUM_FILES + self.file as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Coord::new((index / NUM_FILES) as u8, (index % NUM_FILES) as u8)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        write!(f, "{}{}", file, NUM_RANKS as u8 - self.rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn white_moves_towards_rank_zero() {
        assert_eq!(Color::White.direction(), -1);
        assert!(Color::White.is_promotion_rank(0));
        assert!(Color::Black.is_promotion_rank(7));
        assert_eq!(Color::White.pawn_home_rank(), 6);
        assert_eq!(Color::Black.back_rank(), 0);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn coord_renders_in_algebraic_notation() {
        assert_eq!(Coord::new(7, 0).to_string(), "a1");
        assert_eq!(Coord::new(0, 7).to_string(), "h8");
        assert_eq!(Coord::new(4, 4).to_string(), "e4");
    }

    #[test]
    fn offsets_stay_on_the_board() {
        let corner = Coord::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 2), Some(Coord::new(1, 2)));
        assert_eq!(Coord::from_index(Coord::new(5, 3).index()), Coord::new(5, 3));
    }

    #[test]
    fn piece_letters_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(kind.letter()), Some(kind));
        }
        assert_eq!(PieceKind::from_letter('x'), None);
    }
}
