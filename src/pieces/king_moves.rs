use crate::board::board::Board;
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;
use crate::pieces::piece_shared::push_step_moves;

/// West first, then clockwise.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// Single steps only; castling needs both sides' moves and is produced by
/// the player layer.
pub(crate) fn push_king_moves(king: &Piece, board: &Board, moves: &mut Vec<Move>) {
    push_step_moves(king, board, &KING_OFFSETS, moves);
}

#[cfg(test)]
mod tests {
    use crate::board::board::Board;
    use crate::board::chess_types::Coord;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn boxed_in_king_has_no_candidates() {
        let board = Board::create_standard_board();
        let king = board.piece_at(Coord::new(7, 4)).expect("king should be on e1");
        assert!(king.legal_candidates(&board).is_empty());
    }

    #[test]
    fn corner_king_sees_three_squares() {
        let board = parse_fen("k7/8/8/8/8/8/8/7K w - - 0 1").expect("FEN should parse");
        let king = board.piece_at(Coord::new(7, 7)).expect("king should be on h1");
        let names: Vec<String> = king
            .legal_candidates(&board)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["Kg1", "Kg2", "Kh2"]);
    }
}
