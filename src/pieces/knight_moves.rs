use crate::board::board::Board;
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;
use crate::pieces::piece_shared::push_step_moves;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
];

pub(crate) fn push_knight_moves(knight: &Piece, board: &Board, moves: &mut Vec<Move>) {
    push_step_moves(knight, board, &KNIGHT_OFFSETS, moves);
}
