//! Pawn move generation.
//!
//! Pawns are the only pieces whose quiet moves and captures go in different
//! directions, which is also why the attack test in the player layer has to
//! look at pawn diagonals separately.

use crate::board::board::Board;
use crate::board::chess_types::{Coord, PieceKind};
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;

pub(crate) fn push_pawn_moves(pawn: &Piece, board: &Board, moves: &mut Vec<Move>) {
    let color = pawn.color();
    let from = pawn.position();
    let direction = color.direction();

    if let Some(step) = from.offset(direction, 0) {
        if board.piece_at(step).is_none() {
            push_maybe_promoting(
                pawn,
                Move::PawnMove {
                    piece: *pawn,
                    destination: step,
                },
                moves,
            );

            if pawn.is_first_move() && from.rank == color.pawn_home_rank() {
                if let Some(jump) = step.offset(direction, 0) {
                    if board.piece_at(jump).is_none() {
                        moves.push(Move::PawnJump {
                            piece: *pawn,
                            destination: jump,
                        });
                    }
                }
            }
        }
    }

    for d_file in [-1, 1] {
        let Some(destination) = from.offset(direction, d_file) else {
            continue;
        };
        match board.piece_at(destination) {
            Some(occupant) if occupant.color() != color => push_maybe_promoting(
                pawn,
                Move::PawnCapture {
                    piece: *pawn,
                    destination,
                    captured: *occupant,
                },
                moves,
            ),
            Some(_) => {}
            None => {
                if let Some(victim) = en_passant_victim(pawn, board, destination) {
                    moves.push(Move::EnPassantCapture {
                        piece: *pawn,
                        destination,
                        captured: victim,
                    });
                }
            }
        }
    }
}

/// The enemy pawn that jumped past `destination` on the previous move, if it
/// stands beside `pawn`.
fn en_passant_victim(pawn: &Piece, board: &Board, destination: Coord) -> Option<Piece> {
    let jumped = board.jumped_pawn()?;
    let beside = Coord::new(pawn.position().rank, destination.file);
    (jumped.color() != pawn.color() && jumped.position() == beside).then_some(*jumped)
}

fn push_maybe_promoting(pawn: &Piece, mv: Move, moves: &mut Vec<Move>) {
    let lands_on_last_rank = mv
        .destination()
        .is_some_and(|destination| pawn.color().is_promotion_rank(destination.rank));
    if lands_on_last_rank {
        moves.push(Move::Promotion {
            inner: Box::new(mv),
            promote_to: PieceKind::Queen,
        });
    } else {
        moves.push(mv);
    }
}

#[cfg(test)]
mod tests {
    use crate::board::board::Board;
    use crate::board::chess_types::Coord;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn home_pawn_can_step_or_jump() {
        let board = Board::create_standard_board();
        let pawn = board.piece_at(Coord::new(6, 4)).expect("pawn should be on e2");
        let names: Vec<String> = pawn
            .legal_candidates(&board)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["e3", "e4"]);
    }

    #[test]
    fn blocked_pawn_cannot_jump_over_a_piece() {
        let board = parse_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let pawn = board.piece_at(Coord::new(6, 4)).expect("pawn should be on e2");
        assert!(pawn.legal_candidates(&board).is_empty());
    }

    #[test]
    fn pawn_reaching_the_last_rank_promotes_to_queen() {
        let board = parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let pawn = board.piece_at(Coord::new(1, 0)).expect("pawn should be on a7");
        let moves = pawn.legal_candidates(&board);
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().all(|mv| mv.is_promotion()));
        let names: Vec<String> = moves.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["a8=Q", "axb8=Q"]);
    }

    #[test]
    fn en_passant_requires_the_jumped_pawn_beside() {
        let board = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("FEN should parse");
        let pawn = board.piece_at(Coord::new(3, 4)).expect("pawn should be on e5");
        let names: Vec<String> = pawn
            .legal_candidates(&board)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["e6", "exd6 ep"]);
    }
}
