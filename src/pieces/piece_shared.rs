use crate::board::board::Board;
use crate::board::chess_types::Coord;
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;

/// A quiet move onto an empty square or a capture onto an enemy one.
/// `None` when a friendly piece stands on `destination`.
pub(crate) fn quiet_or_capture(piece: &Piece, board: &Board, destination: Coord) -> Option<Move> {
    match board.piece_at(destination) {
        None => Some(Move::Quiet {
            piece: *piece,
            destination,
        }),
        Some(occupant) if occupant.color() != piece.color() => Some(Move::Capture {
            piece: *piece,
            destination,
            captured: *occupant,
        }),
        Some(_) => None,
    }
}

/// Pushes every move for a piece that steps once along each of `offsets`.
pub(crate) fn push_step_moves(
    piece: &Piece,
    board: &Board,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    let from = piece.position();
    for &(d_rank, d_file) in offsets {
        if let Some(mv) = from
            .offset(d_rank, d_file)
            .and_then(|destination| quiet_or_capture(piece, board, destination))
        {
            moves.push(mv);
        }
    }
}
