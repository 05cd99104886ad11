//! The move model.
//!
//! A [`Move`] is a plain value describing a transition: the piece as it was
//! before moving, where it goes, and whatever it captures or drags along.
//! Moves do not hold on to the board they were generated from; `execute`
//! takes that board explicitly and returns its successor.

use std::fmt;
use std::mem;

use crate::board::board::Board;
use crate::board::board_config::BoardConfig;
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::errors::{ChessError, ChessResult};
use crate::pieces::piece::Piece;

#[derive(Debug, Clone, Eq)]
pub enum Move {
    /// A non-pawn move onto an empty square.
    Quiet { piece: Piece, destination: Coord },
    /// A non-pawn capture.
    Capture {
        piece: Piece,
        destination: Coord,
        captured: Piece,
    },
    PawnMove { piece: Piece, destination: Coord },
    PawnCapture {
        piece: Piece,
        destination: Coord,
        captured: Piece,
    },
    /// Two-square pawn advance. Leaves the pawn open to en passant for one ply.
    PawnJump { piece: Piece, destination: Coord },
    EnPassantCapture {
        piece: Piece,
        destination: Coord,
        captured: Piece,
    },
    /// Wraps the pawn move that lands on the last rank.
    Promotion {
        inner: Box<Move>,
        promote_to: PieceKind,
    },
    KingSideCastle {
        king: Piece,
        destination: Coord,
        rook: Piece,
        rook_destination: Coord,
    },
    QueenSideCastle {
        king: Piece,
        destination: Coord,
        rook: Piece,
        rook_destination: Coord,
    },
    /// Sentinel for "no matching move". Cannot be executed.
    Null,
}

impl Move {
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::Quiet { piece, .. }
            | Move::Capture { piece, .. }
            | Move::PawnMove { piece, .. }
            | Move::PawnCapture { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::EnPassantCapture { piece, .. } => Some(piece),
            Move::Promotion { inner, .. } => inner.moved_piece(),
            Move::KingSideCastle { king, .. } | Move::QueenSideCastle { king, .. } => Some(king),
            Move::Null => None,
        }
    }

    #[inline]
    pub fn source(&self) -> Option<Coord> {
        self.moved_piece().map(Piece::position)
    }

    pub fn destination(&self) -> Option<Coord> {
        match self {
            Move::Quiet { destination, .. }
            | Move::Capture { destination, .. }
            | Move::PawnMove { destination, .. }
            | Move::PawnCapture { destination, .. }
            | Move::PawnJump { destination, .. }
            | Move::EnPassantCapture { destination, .. }
            | Move::KingSideCastle { destination, .. }
            | Move::QueenSideCastle { destination, .. } => Some(*destination),
            Move::Promotion { inner, .. } => inner.destination(),
            Move::Null => None,
        }
    }

    pub fn captured_piece(&self) -> Option<&Piece> {
        match self {
            Move::Capture { captured, .. }
            | Move::PawnCapture { captured, .. }
            | Move::EnPassantCapture { captured, .. } => Some(captured),
            Move::Promotion { inner, .. } => inner.captured_piece(),
            _ => None,
        }
    }

    pub fn castle_rook(&self) -> Option<&Piece> {
        match self {
            Move::KingSideCastle { rook, .. } | Move::QueenSideCastle { rook, .. } => Some(rook),
            _ => None,
        }
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self {
            Move::Promotion { promote_to, .. } => Some(*promote_to),
            _ => None,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece().is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        matches!(self, Move::KingSideCastle { .. } | Move::QueenSideCastle { .. })
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Promotion { .. })
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassantCapture { .. })
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Move::Null)
    }

    /// Forward pawn moves. They never attack the square they land on.
    pub fn is_pawn_push(&self) -> bool {
        match self {
            Move::PawnMove { .. } | Move::PawnJump { .. } => true,
            Move::Promotion { inner, .. } => inner.is_pawn_push(),
            _ => false,
        }
    }

    /// Returns the same promotion with a different target piece.
    pub fn with_promotion_kind(&self, kind: PieceKind) -> ChessResult<Move> {
        match (self, kind) {
            (_, PieceKind::Pawn | PieceKind::King) => Err(ChessError::InvalidPromotion(kind)),
            (Move::Promotion { inner, .. }, _) => Ok(Move::Promotion {
                inner: inner.clone(),
                promote_to: kind,
            }),
            _ => Err(ChessError::InvalidPromotion(kind)),
        }
    }

    /// Builds the board that results from playing this move on `board`.
    /// `board` itself is left untouched.
    pub fn execute(&self, board: &Board) -> ChessResult<Board> {
        self.successor_config(board)?.build()
    }

    pub(crate) fn successor_config(&self, board: &Board) -> ChessResult<BoardConfig> {
        match self {
            Move::Null => Err(ChessError::NullMoveExecution),
            Move::Promotion { inner, promote_to } => {
                let mut config = inner.successor_config(board)?;
                if let (Some(pawn), Some(destination)) = (inner.moved_piece(), inner.destination())
                {
                    let promoted =
                        Piece::new(*promote_to, pawn.color(), destination).with_first_move(false);
                    config.set_piece(promoted);
                }
                Ok(config)
            }
            Move::KingSideCastle {
                king,
                destination,
                rook,
                rook_destination,
            }
            | Move::QueenSideCastle {
                king,
                destination,
                rook,
                rook_destination,
            } => {
                let mut config = carry_over(board, king, Some(rook));
                config
                    .set_piece(king.castle_to(*destination))
                    .set_piece(rook.move_to(*rook_destination));
                Ok(finish(config, board, king.color(), false))
            }
            Move::Quiet { piece, destination } | Move::PawnMove { piece, destination } => {
                let mut config = carry_over(board, piece, None);
                config.set_piece(piece.move_to(*destination));
                let is_pawn = matches!(self, Move::PawnMove { .. });
                Ok(finish(config, board, piece.color(), is_pawn))
            }
            Move::PawnJump { piece, destination } => {
                let mut config = carry_over(board, piece, None);
                let jumped = piece.move_to(*destination);
                config.set_piece(jumped).set_jumped_pawn(Some(jumped));
                Ok(finish(config, board, piece.color(), true))
            }
            Move::Capture {
                piece,
                destination,
                captured,
            }
            | Move::PawnCapture {
                piece,
                destination,
                captured,
            } => {
                let mut config = carry_over(board, piece, Some(captured));
                config.set_piece(piece.move_to(*destination));
                Ok(finish(config, board, piece.color(), true))
            }
            Move::EnPassantCapture {
                piece,
                destination,
                captured,
            } => {
                let mut config = carry_over(board, piece, Some(captured));
                let capturer = piece.move_to(*destination);
                config.set_piece(capturer).set_en_passant_pawn(Some(capturer));
                Ok(finish(config, board, piece.color(), true))
            }
        }
    }
}

/// Every piece on `board` except the mover and the piece it removes.
fn carry_over(board: &Board, mover: &Piece, removed: Option<&Piece>) -> BoardConfig {
    let mut config = BoardConfig::new();
    for piece in board.all_active_pieces() {
        let leaves = piece.position() == mover.position();
        let removed_here = removed.is_some_and(|removed| removed.position() == piece.position());
        if !leaves && !removed_here {
            config.set_piece(*piece);
        }
    }
    config
}

fn finish(mut config: BoardConfig, board: &Board, mover: Color, resets_clock: bool) -> BoardConfig {
    let halfmove_clock = if resets_clock {
        0
    } else {
        board.halfmove_clock() + 1
    };
    let fullmove_number = match mover {
        Color::White => board.fullmove_number(),
        Color::Black => board.fullmove_number() + 1,
    };
    config
        .set_side_to_move(mover.opposite())
        .set_halfmove_clock(halfmove_clock)
        .set_fullmove_number(fullmove_number);
    config
}

/// Promotions compare by their underlying move only, so a promotion chosen
/// with a different target piece still matches the generated one.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Move::Promotion { inner: a, .. }, Move::Promotion { inner: b, .. }) => a == b,
            _ => {
                mem::discriminant(self) == mem::discriminant(other)
                    && same_piece(self.moved_piece(), other.moved_piece())
                    && self.destination() == other.destination()
                    && same_piece(self.captured_piece(), other.captured_piece())
                    && same_piece(self.castle_rook(), other.castle_rook())
            }
        }
    }
}

fn same_piece(a: Option<&Piece>, b: Option<&Piece>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.is_same_piece(b),
        (None, None) => true,
        _ => false,
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Quiet { piece, destination } => {
                write!(f, "{}{}", piece.kind().letter(), destination)
            }
            Move::Capture {
                piece, destination, ..
            } => write!(f, "{}x{}", piece.kind().letter(), destination),
            Move::PawnMove { destination, .. } | Move::PawnJump { destination, .. } => {
                write!(f, "{destination}")
            }
            Move::PawnCapture {
                piece, destination, ..
            } => write!(f, "{}x{}", file_letter(piece), destination),
            Move::EnPassantCapture {
                piece, destination, ..
            } => write!(f, "{}x{} ep", file_letter(piece), destination),
            Move::Promotion { inner, promote_to } => {
                write!(f, "{}={}", inner, promote_to.letter())
            }
            Move::KingSideCastle { .. } => f.write_str("O-O"),
            Move::QueenSideCastle { .. } => f.write_str("O-O-O"),
            Move::Null => f.write_str("--"),
        }
    }
}

fn file_letter(piece: &Piece) -> char {
    (b'a' + piece.position().file) as char
}

#[cfg(test)]
mod tests {
    use super::Move;
    use crate::board::board::Board;
    use crate::board::chess_types::{Color, Coord, PieceKind};
    use crate::errors::ChessError;
    use crate::move_generation::player::MoveStatus;
    use crate::pieces::piece::Piece;
    use crate::utils::algebraic::square_to_coord;
    use crate::utils::fen_parser::parse_fen;

    fn play(board: &Board, from: &str, to: &str) -> Board {
        let from = square_to_coord(from).expect("source square should parse");
        let to = square_to_coord(to).expect("destination square should parse");
        let mv = Move::create(board, from, to);
        assert!(!mv.is_null(), "{from}{to} should be legal");
        let transition = board.current_player().play_move(&mv);
        assert_eq!(transition.status(), MoveStatus::Done);
        transition.into_board()
    }

    #[test]
    fn capture_removes_exactly_one_enemy_piece() {
        let board = Board::create_standard_board();
        let board = play(&board, "e2", "e4");
        let board = play(&board, "d7", "d5");
        let before_white = board.active_pieces(Color::White).len();
        let before_black = board.active_pieces(Color::Black).len();

        let capture = Move::create(&board, Coord::new(4, 4), Coord::new(3, 3));
        assert!(matches!(capture, Move::PawnCapture { .. }));
        assert_eq!(capture.to_string(), "exd5");

        let after = capture.execute(&board).expect("capture should execute");
        assert_eq!(after.active_pieces(Color::White).len(), before_white);
        assert_eq!(after.active_pieces(Color::Black).len(), before_black - 1);
        assert_eq!(after.side_to_move(), Color::Black);
        assert_eq!(after.halfmove_clock(), 0);
        assert_eq!(after.fullmove_number(), 2);
    }

    #[test]
    fn execution_is_deterministic_and_leaves_the_source_alone() {
        let board = Board::create_standard_board();
        let mv = Move::create(&board, Coord::new(7, 6), Coord::new(5, 5));
        assert_eq!(mv.to_string(), "Nf3");

        let first = mv.execute(&board).expect("knight move should execute");
        let second = mv.execute(&board).expect("knight move should execute");
        assert_eq!(first.to_display_string(), second.to_display_string());
        for color in Color::ALL {
            assert_eq!(first.active_pieces(color), second.active_pieces(color));
        }
        assert_eq!(first.jumped_pawn(), second.jumped_pawn());
        assert_eq!(first.side_to_move(), second.side_to_move());
        assert_eq!(first.halfmove_clock(), second.halfmove_clock());
        assert_eq!(first.fullmove_number(), second.fullmove_number());
        assert_eq!(first.halfmove_clock(), 1);

        let pristine = Board::create_standard_board();
        assert_eq!(board.to_display_string(), pristine.to_display_string());
        for color in Color::ALL {
            assert_eq!(board.active_pieces(color), pristine.active_pieces(color));
        }
        assert_eq!(board.jumped_pawn(), None);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn moved_piece_lands_with_the_same_kind_and_color() {
        let board = Board::create_standard_board();
        for mv in board.current_player().legal_moves() {
            let after = mv.execute(&board).expect("opening move should execute");
            let destination = mv.destination().expect("legal move has a destination");
            let landed = after.piece_at(destination).expect("destination should be occupied");
            let moved = mv.moved_piece().expect("legal move has a piece");
            assert_eq!(landed.kind(), moved.kind());
            assert_eq!(landed.color(), moved.color());
            assert!(!landed.is_first_move());
        }
    }

    #[test]
    fn promotion_places_the_chosen_kind() {
        let board = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotion = Move::create(&board, Coord::new(1, 0), Coord::new(0, 0));
        assert_eq!(promotion.promotion_kind(), Some(PieceKind::Queen));

        let knight = promotion
            .with_promotion_kind(PieceKind::Knight)
            .expect("knight is a valid promotion");
        assert_eq!(knight, promotion);
        assert_eq!(knight.to_string(), "a8=N");

        let transition = board.current_player().play_move(&knight);
        assert_eq!(transition.status(), MoveStatus::Done);
        let landed = transition
            .board()
            .piece_at(Coord::new(0, 0))
            .expect("a8 should hold the promoted piece");
        assert_eq!(landed.kind(), PieceKind::Knight);
        assert_eq!(landed.color(), Color::White);

        assert_eq!(
            promotion.with_promotion_kind(PieceKind::King),
            Err(ChessError::InvalidPromotion(PieceKind::King))
        );
    }

    #[test]
    fn en_passant_window_lasts_one_move() {
        let board = Board::create_standard_board();
        let board = play(&board, "e2", "e4");
        let board = play(&board, "a7", "a6");
        let board = play(&board, "e4", "e5");
        let board = play(&board, "d7", "d5");

        let ep = Move::create(&board, Coord::new(3, 4), Coord::new(2, 3));
        assert!(ep.is_en_passant());
        assert_eq!(ep.to_string(), "exd6 ep");
        let after = ep.execute(&board).expect("en passant should execute");
        assert!(after.piece_at(Coord::new(3, 3)).is_none());
        assert_eq!(after.en_passant_pawn().map(|pawn| pawn.position()), Some(Coord::new(2, 3)));

        // Spend a tempo on each side; the window is gone.
        let later = play(&board, "g1", "f3");
        let later = play(&later, "g8", "f6");
        let stale = Move::create(&later, Coord::new(3, 4), Coord::new(2, 3));
        assert!(stale.is_null());
    }

    #[test]
    fn equality_follows_piece_identity() {
        let e1 = Coord::new(7, 4);
        let f1 = Coord::new(7, 5);
        let king_side_only = Piece::king(Color::White, e1, true, false);
        let queen_side_only = Piece::king(Color::White, e1, false, true);
        let step = |piece| Move::Quiet {
            piece,
            destination: f1,
        };
        assert_eq!(step(king_side_only), step(queen_side_only));
        assert_ne!(step(king_side_only), step(king_side_only.with_first_move(false)));
    }

    #[test]
    fn null_move_cannot_be_executed() {
        let board = Board::create_standard_board();
        assert_eq!(
            Move::Null.execute(&board).expect_err("null move should fail"),
            ChessError::NullMoveExecution
        );
        assert_eq!(Move::Null.to_string(), "--");
    }
}
