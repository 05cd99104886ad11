//! Mutable staging area for a position.
//!
//! A `BoardConfig` is the only way to make a [`Board`]: fill in placement,
//! side to move and the pawn bookkeeping, then call [`BoardConfig::build`].
//! Move execution goes through the same path, so every board in the engine
//! is produced by one construction function.

use crate::board::board::Board;
use crate::board::chess_rules::{NUM_FILES, NUM_TILES};
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::errors::ChessResult;
use crate::pieces::piece::Piece;

const BACK_RANK_LAYOUT: [PieceKind; NUM_FILES] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    placement: [Option<Piece>; NUM_TILES],
    side_to_move: Color,
    jumped_pawn: Option<Piece>,
    en_passant_pawn: Option<Piece>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            placement: [None; NUM_TILES],
            side_to_move: Color::White,
            jumped_pawn: None,
            en_passant_pawn: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl BoardConfig {
    /// No pieces, White to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard starting layout.
    pub fn standard() -> Self {
        let mut config = Self::new();
        for color in Color::ALL {
            let back_rank = color.back_rank();
            let pawn_rank = color.pawn_home_rank();
            for (file, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
                let file = file as u8;
                config.set_piece(Piece::new(*kind, color, Coord::new(back_rank, file)));
                config.set_piece(Piece::new(PieceKind::Pawn, color, Coord::new(pawn_rank, file)));
            }
        }
        config
    }

    /// Places `piece` on its own position, replacing whatever was there.
    pub fn set_piece(&mut self, piece: Piece) -> &mut Self {
        self.placement[piece.position().index()] = Some(piece);
        self
    }

    pub fn remove_piece(&mut self, at: Coord) -> &mut Self {
        self.placement[at.index()] = None;
        self
    }

    pub fn set_side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    pub fn set_jumped_pawn(&mut self, pawn: Option<Piece>) -> &mut Self {
        self.jumped_pawn = pawn;
        self
    }

    pub fn set_en_passant_pawn(&mut self, pawn: Option<Piece>) -> &mut Self {
        self.en_passant_pawn = pawn;
        self
    }

    pub fn set_halfmove_clock(&mut self, halfmove_clock: u32) -> &mut Self {
        self.halfmove_clock = halfmove_clock;
        self
    }

    pub fn set_fullmove_number(&mut self, fullmove_number: u32) -> &mut Self {
        self.fullmove_number = fullmove_number;
        self
    }

    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.placement[at.index()].as_ref()
    }

    #[inline]
    pub fn placement(&self) -> &[Option<Piece>; NUM_TILES] {
        &self.placement
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn jumped_pawn(&self) -> Option<&Piece> {
        self.jumped_pawn.as_ref()
    }

    #[inline]
    pub fn en_passant_pawn(&self) -> Option<&Piece> {
        self.en_passant_pawn.as_ref()
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Freezes the configuration into an immutable board.
    ///
    /// Fails with [`crate::errors::ChessError::MissingKing`] when either side
    /// has no king.
    pub fn build(&self) -> ChessResult<Board> {
        Board::from_config(self)
    }
}

#[cfg(test)]
mod tests {
    use super::BoardConfig;
    use crate::board::chess_types::{Color, Coord, PieceKind};
    use crate::errors::ChessError;
    use crate::pieces::piece::Piece;

    #[test]
    fn empty_config_refuses_to_build() {
        let result = BoardConfig::new().build();
        assert!(matches!(result, Err(ChessError::MissingKing(Color::White))));
    }

    #[test]
    fn one_king_is_not_enough() {
        let mut config = BoardConfig::new();
        config.set_piece(Piece::new(PieceKind::King, Color::White, Coord::new(7, 4)));
        assert_eq!(
            config.build().expect_err("build should fail without a black king"),
            ChessError::MissingKing(Color::Black)
        );
    }

    #[test]
    fn standard_layout_has_thirty_two_pieces() {
        let config = BoardConfig::standard();
        let count = config.placement().iter().flatten().count();
        assert_eq!(count, 32);
        let white_queen = config.piece_at(Coord::new(7, 3)).expect("white queen should be on d1");
        assert_eq!(white_queen.kind(), PieceKind::Queen);
        assert_eq!(white_queen.color(), Color::White);
    }

    #[test]
    fn builder_setters_chain() {
        let mut config = BoardConfig::new();
        config
            .set_piece(Piece::new(PieceKind::King, Color::White, Coord::new(7, 4)))
            .set_piece(Piece::new(PieceKind::King, Color::Black, Coord::new(0, 4)))
            .set_side_to_move(Color::Black)
            .set_fullmove_number(12);
        let board = config.build().expect("two kings should build");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.fullmove_number(), 12);
    }
}
