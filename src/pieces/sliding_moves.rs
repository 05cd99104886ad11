//! Ray casting for bishops, rooks and queens.

use crate::board::board::Board;
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;

pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Walks each ray until it leaves the board or hits a piece. An enemy piece
/// ends the ray as a capture; a friendly one just ends it.
pub(crate) fn push_sliding_moves(
    piece: &Piece,
    board: &Board,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_rank, d_file) in directions {
        let mut cursor = piece.position();
        while let Some(destination) = cursor.offset(d_rank, d_file) {
            match board.piece_at(destination) {
                None => moves.push(Move::Quiet {
                    piece: *piece,
                    destination,
                }),
                Some(occupant) => {
                    if occupant.color() != piece.color() {
                        moves.push(Move::Capture {
                            piece: *piece,
                            destination,
                            captured: *occupant,
                        });
                    }
                    break;
                }
            }
            cursor = destination;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::chess_types::Coord;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn rook_on_open_board_sees_fourteen_squares() {
        let board = parse_fen("4k3/8/8/8/3R4/8/8/K7 w - - 0 1").expect("FEN should parse");
        let rook = board.piece_at(Coord::new(4, 3)).expect("rook should be on d4");
        assert_eq!(rook.legal_candidates(&board).len(), 14);
    }

    #[test]
    fn ray_stops_at_first_blocker() {
        // Bishop on c1, friendly pawn on d2, enemy pawn on b2.
        let board = parse_fen("4k3/8/8/8/8/8/1p1P4/2B1K3 w - - 0 1").expect("FEN should parse");
        let bishop = board.piece_at(Coord::new(7, 2)).expect("bishop should be on c1");
        let moves = bishop.legal_candidates(&board);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to_string(), "Bxb2");
    }

    #[test]
    fn queen_combines_both_ray_sets() {
        let board = parse_fen("k7/8/8/8/3Q4/8/8/7K w - - 0 1").expect("FEN should parse");
        let queen = board.piece_at(Coord::new(4, 3)).expect("queen should be on d4");
        assert_eq!(queen.legal_candidates(&board).len(), 27);
    }
}
