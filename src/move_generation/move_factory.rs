//! Resolving user input into concrete moves.

use crate::board::board::Board;
use crate::board::chess_types::Coord;
use crate::errors::ChessResult;
use crate::move_generation::chess_move::Move;
use crate::utils::algebraic::square_to_coord;

impl Move {
    /// The legal move of the side to move that goes from `from` to `to`, or
    /// [`Move::Null`] when there is none. For promotions this is the queen
    /// promotion; pick another piece with [`Move::with_promotion_kind`].
    pub fn create(board: &Board, from: Coord, to: Coord) -> Move {
        board
            .current_player()
            .legal_moves()
            .iter()
            .find(|mv| mv.source() == Some(from) && mv.destination() == Some(to))
            .cloned()
            .unwrap_or(Move::Null)
    }

    /// Like [`Move::create`], taking square names such as `"e2"`.
    pub fn create_from_squares(board: &Board, from: &str, to: &str) -> ChessResult<Move> {
        Ok(Move::create(board, square_to_coord(from)?, square_to_coord(to)?))
    }
}
