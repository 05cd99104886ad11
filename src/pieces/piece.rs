//! The piece model.
//!
//! Pieces are small immutable values. Moving a piece never changes it in
//! place; `move_to` and `castle_to` return the piece as it stands on its new
//! square.

use std::fmt;

use crate::board::board::Board;
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::move_generation::chess_move::Move;
use crate::pieces::{king_moves, knight_moves, pawn_moves, sliding_moves};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    position: Coord,
    first_move: bool,
    king_side_castle: bool,
    queen_side_castle: bool,
    castled: bool,
    identity: u64,
}

impl Piece {
    /// A piece that has not moved yet. Kings start with both castle flags set.
    pub fn new(kind: PieceKind, color: Color, position: Coord) -> Self {
        let is_king = kind == PieceKind::King;
        Self::assemble(kind, color, position, true, is_king, is_king, false)
    }

    /// A king with explicit castling rights. `first_move` is set whenever
    /// either right survives.
    pub fn king(color: Color, position: Coord, king_side: bool, queen_side: bool) -> Self {
        Self::assemble(
            PieceKind::King,
            color,
            position,
            king_side || queen_side,
            king_side,
            queen_side,
            false,
        )
    }

    /// Returns a copy with the first-move flag replaced. Clearing it on a king
    /// also clears its castling rights.
    pub fn with_first_move(self, first_move: bool) -> Self {
        let (ks, qs) = if first_move {
            (self.king_side_castle, self.queen_side_castle)
        } else {
            (false, false)
        };
        Self::assemble(
            self.kind,
            self.color,
            self.position,
            first_move,
            ks,
            qs,
            self.castled,
        )
    }

    fn assemble(
        kind: PieceKind,
        color: Color,
        position: Coord,
        first_move: bool,
        king_side_castle: bool,
        queen_side_castle: bool,
        castled: bool,
    ) -> Self {
        Piece {
            kind,
            color,
            position,
            first_move,
            king_side_castle,
            queen_side_castle,
            castled,
            identity: identity_hash(kind, color, position, first_move),
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[inline]
    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    #[inline]
    pub fn is_king_side_castle_allowed(&self) -> bool {
        self.king_side_castle
    }

    #[inline]
    pub fn is_queen_side_castle_allowed(&self) -> bool {
        self.queen_side_castle
    }

    #[inline]
    pub fn is_castled(&self) -> bool {
        self.castled
    }

    #[inline]
    pub fn identity(&self) -> u64 {
        self.identity
    }

    #[inline]
    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Same kind, color, square and first-move state.
    #[inline]
    pub fn is_same_piece(&self, other: &Piece) -> bool {
        self.identity == other.identity
            && self.kind == other.kind
            && self.color == other.color
            && self.position == other.position
            && self.first_move == other.first_move
    }

    /// The piece after a regular move to `destination`.
    pub fn move_to(&self, destination: Coord) -> Piece {
        Self::assemble(
            self.kind,
            self.color,
            destination,
            false,
            false,
            false,
            self.castled,
        )
    }

    /// The king after castling onto `destination`.
    pub fn castle_to(&self, destination: Coord) -> Piece {
        Self::assemble(self.kind, self.color, destination, false, false, false, true)
    }

    /// Pseudo-legal moves for this piece on `board`. Castling is left to the player.
    pub fn legal_candidates(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        self.push_candidates(board, &mut moves);
        moves
    }

    pub(crate) fn push_candidates(&self, board: &Board, moves: &mut Vec<Move>) {
        match self.kind {
            PieceKind::Pawn => pawn_moves::push_pawn_moves(self, board, moves),
            PieceKind::Knight => knight_moves::push_knight_moves(self, board, moves),
            PieceKind::Bishop => {
                sliding_moves::push_sliding_moves(self, board, &sliding_moves::DIAGONALS, moves)
            }
            PieceKind::Rook => {
                sliding_moves::push_sliding_moves(self, board, &sliding_moves::ORTHOGONALS, moves)
            }
            PieceKind::Queen => {
                sliding_moves::push_sliding_moves(self, board, &sliding_moves::DIAGONALS, moves);
                sliding_moves::push_sliding_moves(self, board, &sliding_moves::ORTHOGONALS, moves);
            }
            PieceKind::King => king_moves::push_king_moves(self, board, moves),
        }
    }
}

fn identity_hash(kind: PieceKind, color: Color, position: Coord, first_move: bool) -> u64 {
    let mut hash = kind.index() as u64;
    hash = hash.wrapping_mul(31).wrapping_add(color.index() as u64);
    hash = hash.wrapping_mul(31).wrapping_add(position.index() as u64);
    hash.wrapping_mul(31).wrapping_add(u64::from(first_move))
}

/// FEN-style letter: uppercase for White, lowercase for Black.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.kind.letter();
        let letter = match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        };
        write!(f, "{letter}")
    }
}
