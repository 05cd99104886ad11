//! Per-side legality: check detection, castling rights and trial execution.
//!
//! Legality is settled in two phases. Board construction gives each side a
//! [`PlayerState`] holding its pseudo-legal moves plus castles. Whether a move
//! leaves the mover's own king attacked is only decided by
//! [`Player::play_move`], which executes the move and inspects the result.

use std::sync::OnceLock;

use crate::board::board::Board;
use crate::board::chess_rules::{KING_HOME_FILE, KING_SIDE_ROOK_FILE, QUEEN_SIDE_ROOK_FILE};
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::errors::{ChessError, ChessResult};
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;

/// Outcome of [`Player::play_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Done,
    /// The move is not in the player's legal set.
    Illegal,
    /// The move would leave the mover's own king attacked.
    InCheck,
}

impl MoveStatus {
    #[inline]
    pub fn is_done(self) -> bool {
        self == MoveStatus::Done
    }
}

/// A move attempt and the board it leads to.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    from_board: &'a Board,
    to_board: Option<Board>,
    mv: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    fn done(from_board: &'a Board, to_board: Board, mv: Move) -> Self {
        MoveTransition {
            from_board,
            to_board: Some(to_board),
            mv,
            status: MoveStatus::Done,
        }
    }

    fn rejected(from_board: &'a Board, mv: Move, status: MoveStatus) -> Self {
        MoveTransition {
            from_board,
            to_board: None,
            mv,
            status,
        }
    }

    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }

    #[inline]
    pub fn mv(&self) -> &Move {
        &self.mv
    }

    #[inline]
    pub fn from_board(&self) -> &'a Board {
        self.from_board
    }

    /// The new board when the move was played, otherwise the unchanged source.
    pub fn board(&self) -> &Board {
        self.to_board.as_ref().unwrap_or(self.from_board)
    }

    pub fn into_board(self) -> Board {
        match self.to_board {
            Some(board) => board,
            None => self.from_board.clone(),
        }
    }
}

/// Derived per-side state stored inside a [`Board`].
#[derive(Debug, Clone)]
pub struct PlayerState {
    color: Color,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
    escape_move: OnceLock<bool>,
}

impl PlayerState {
    /// Stand-in used while the board that owns it is still being assembled.
    pub(crate) fn pending(color: Color) -> Self {
        PlayerState {
            color,
            king: Piece::new(
                PieceKind::King,
                color,
                Coord::new(color.back_rank(), KING_HOME_FILE),
            ),
            legal_moves: Vec::new(),
            in_check: false,
            escape_move: OnceLock::new(),
        }
    }

    pub(crate) fn new(
        board: &Board,
        color: Color,
        own_moves: &[Move],
        opponent_moves: &[Move],
    ) -> ChessResult<Self> {
        let king = *board
            .active_pieces(color)
            .iter()
            .find(|piece| piece.kind() == PieceKind::King)
            .ok_or(ChessError::MissingKing(color))?;

        let in_check = opponent_moves
            .iter()
            .any(|mv| mv.destination() == Some(king.position()));

        // Capturing the king is never a move; it only counts as an attack.
        let mut legal_moves: Vec<Move> = own_moves
            .iter()
            .filter(|mv| !captures_king(mv))
            .cloned()
            .collect();
        legal_moves.extend(king_castles(board, &king, in_check, opponent_moves));

        Ok(PlayerState {
            color,
            king,
            legal_moves,
            in_check,
            escape_move: OnceLock::new(),
        })
    }
}

fn captures_king(mv: &Move) -> bool {
    mv.captured_piece()
        .is_some_and(|piece| piece.kind() == PieceKind::King)
}

/// Opponent moves that attack `tile`. Pawn pushes never attack.
fn attack_moves_on_tile(tile: Coord, opponent_moves: &[Move]) -> Vec<Move> {
    opponent_moves
        .iter()
        .filter(|mv| mv.destination() == Some(tile) && !mv.is_pawn_push())
        .cloned()
        .collect()
}

/// Whether `attacker` controls `tile`. Pawn captures onto empty squares are
/// never generated, so pawn diagonals are checked against the board directly.
fn is_tile_attacked(board: &Board, tile: Coord, attacker: Color, attacker_moves: &[Move]) -> bool {
    if attacker_moves
        .iter()
        .any(|mv| mv.destination() == Some(tile) && !mv.is_pawn_push())
    {
        return true;
    }
    let behind = -attacker.direction();
    [-1, 1].into_iter().any(|d_file| {
        tile.offset(behind, d_file)
            .and_then(|from| board.piece_at(from))
            .is_some_and(|piece| piece.kind() == PieceKind::Pawn && piece.color() == attacker)
    })
}

fn king_castles(board: &Board, king: &Piece, in_check: bool, opponent_moves: &[Move]) -> Vec<Move> {
    let color = king.color();
    let rank = color.back_rank();
    let mut castles = Vec::new();
    if in_check || !king.is_first_move() || king.position() != Coord::new(rank, KING_HOME_FILE) {
        return castles;
    }

    let attacker = color.opposite();
    let empty = |files: &[u8]| {
        files
            .iter()
            .all(|&file| !board.tile(Coord::new(rank, file)).is_occupied())
    };
    let safe = |files: &[u8]| {
        files.iter().all(|&file| {
            !is_tile_attacked(board, Coord::new(rank, file), attacker, opponent_moves)
        })
    };
    let unmoved_rook = |file: u8| {
        board.piece_at(Coord::new(rank, file)).copied().filter(|rook| {
            rook.kind() == PieceKind::Rook && rook.color() == color && rook.is_first_move()
        })
    };

    if king.is_king_side_castle_allowed() && empty(&[5, 6]) && safe(&[5, 6]) {
        if let Some(rook) = unmoved_rook(KING_SIDE_ROOK_FILE) {
            castles.push(Move::KingSideCastle {
                king: *king,
                destination: Coord::new(rank, 6),
                rook,
                rook_destination: Coord::new(rank, 5),
            });
        }
    }
    if king.is_queen_side_castle_allowed() && empty(&[1, 2, 3]) && safe(&[3, 2]) {
        if let Some(rook) = unmoved_rook(QUEEN_SIDE_ROOK_FILE) {
            castles.push(Move::QueenSideCastle {
                king: *king,
                destination: Coord::new(rank, 2),
                rook,
                rook_destination: Coord::new(rank, 3),
            });
        }
    }
    castles
}

/// One side of a board, viewed together with the board it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    board: &'a Board,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(board: &'a Board, state: &'a PlayerState) -> Self {
        Player { board, state }
    }

    #[inline]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.state.color
    }

    #[inline]
    pub fn king(&self) -> &'a Piece {
        &self.state.king
    }

    /// Pseudo-legal moves plus castles. Each still has to pass
    /// [`Player::play_move`].
    #[inline]
    pub fn legal_moves(&self) -> &'a [Move] {
        &self.state.legal_moves
    }

    #[inline]
    pub fn active_pieces(&self) -> &'a [Piece] {
        self.board.active_pieces(self.color())
    }

    pub fn opponent(&self) -> Player<'a> {
        self.board.player(self.color().opposite())
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.state.in_check
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_escape_move()
    }

    /// No playable move while not in check, or bare kings on both sides.
    pub fn is_in_stalemate(&self) -> bool {
        let bare_kings =
            self.active_pieces().len() == 1 && self.opponent().active_pieces().len() == 1;
        bare_kings || (!self.is_in_check() && !self.has_escape_move())
    }

    /// Whether any legal move survives trial execution. Computed once per board.
    pub fn has_escape_move(&self) -> bool {
        *self.state.escape_move.get_or_init(|| {
            self.legal_moves()
                .iter()
                .any(|mv| self.play_move(mv).status().is_done())
        })
    }

    #[inline]
    pub fn is_castled(&self) -> bool {
        self.king().is_castled()
    }

    #[inline]
    pub fn is_king_side_castle_allowed(&self) -> bool {
        self.king().is_king_side_castle_allowed()
    }

    #[inline]
    pub fn is_queen_side_castle_allowed(&self) -> bool {
        self.king().is_queen_side_castle_allowed()
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.legal_moves().contains(mv)
    }

    /// Tries `mv` on this player's board.
    ///
    /// Moves outside the legal set are `Illegal`; moves that leave the own king
    /// attacked are `InCheck`. In both cases the source board is kept.
    pub fn play_move(&self, mv: &Move) -> MoveTransition<'a> {
        if !self.is_move_legal(mv) {
            return MoveTransition::rejected(self.board, mv.clone(), MoveStatus::Illegal);
        }
        match mv.execute(self.board) {
            Ok(next) => {
                if next.player(self.color()).is_in_check() {
                    MoveTransition::rejected(self.board, mv.clone(), MoveStatus::InCheck)
                } else {
                    MoveTransition::done(self.board, next, mv.clone())
                }
            }
            Err(err) => {
                log::error!("move {mv} could not be executed: {err}");
                MoveTransition::rejected(self.board, mv.clone(), MoveStatus::Illegal)
            }
        }
    }

    /// Castles available against the given opponent moves.
    pub fn calculate_king_castles(&self, opponent_moves: &[Move]) -> Vec<Move> {
        king_castles(self.board, self.king(), self.is_in_check(), opponent_moves)
    }

    /// Opponent moves that land on `tile`, excluding pawn pushes.
    pub fn calculate_attack_moves_on_tile(&self, tile: Coord) -> Vec<Move> {
        attack_moves_on_tile(tile, self.opponent().legal_moves())
    }

    /// Whether the opponent controls `tile`, including pawn diagonals onto
    /// empty squares.
    pub fn is_tile_attacked(&self, tile: Coord) -> bool {
        let opponent = self.opponent();
        is_tile_attacked(self.board, tile, opponent.color(), opponent.legal_moves())
    }
}

#[cfg(test)]
mod tests {
    use super::MoveStatus;
    use crate::board::board::Board;
    use crate::board::chess_types::{Color, Coord};
    use crate::move_generation::chess_move::Move;
    use crate::utils::fen_parser::parse_fen;

    fn play(board: &Board, from: &str, to: &str) -> Board {
        let mv = Move::create_from_squares(board, from, to).expect("squares should parse");
        let transition = board.current_player().play_move(&mv);
        assert_eq!(transition.status(), MoveStatus::Done, "{from}{to}");
        transition.into_board()
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let board = Board::create_standard_board();
        let board = play(&board, "f2", "f3");
        let board = play(&board, "e7", "e5");
        let board = play(&board, "g2", "g4");
        let board = play(&board, "d8", "h4");

        let white = board.current_player();
        assert_eq!(white.color(), Color::White);
        assert!(white.is_in_check());
        assert!(white.is_in_checkmate());
        assert!(!white.is_in_stalemate());
        assert!(board.is_game_over());
        assert!(white
            .legal_moves()
            .iter()
            .all(|mv| !white.play_move(mv).status().is_done()));
    }

    #[test]
    fn stalemate_has_no_playable_move_without_check() {
        // Black king on a8 boxed in by the white queen on b6.
        let board = parse_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").expect("FEN should parse");
        let black = board.current_player();
        assert!(!black.is_in_check());
        assert!(black.is_in_stalemate());
        assert!(!black.is_in_checkmate());
        assert!(!black.legal_moves().is_empty());
        assert!(black
            .legal_moves()
            .iter()
            .all(|mv| black.play_move(mv).status() == MoveStatus::InCheck));
    }

    #[test]
    fn bare_kings_are_a_draw() {
        let board = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(board.current_player().is_in_stalemate());
        assert!(board.is_game_over());
    }

    #[test]
    fn pinned_piece_moves_are_rejected_as_in_check() {
        // The e2 knight is pinned by the e8 rook.
        let board = parse_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let white = board.current_player();
        let knight_move = Move::create_from_squares(&board, "e2", "c3").expect("squares parse");
        assert!(white.is_move_legal(&knight_move));
        let transition = white.play_move(&knight_move);
        assert_eq!(transition.status(), MoveStatus::InCheck);
        assert_eq!(
            transition.board().to_display_string(),
            board.to_display_string()
        );
    }

    #[test]
    fn moves_outside_the_legal_set_are_illegal() {
        let board = Board::create_standard_board();
        let black_pawn = *board.piece_at(Coord::new(1, 4)).expect("pawn should be on e7");
        let foreign = Move::PawnJump {
            piece: black_pawn,
            destination: Coord::new(3, 4),
        };
        let transition = board.current_player().play_move(&foreign);
        assert_eq!(transition.status(), MoveStatus::Illegal);
        assert_eq!(transition.mv(), &foreign);
    }

    #[test]
    fn castling_requires_empty_and_safe_squares() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let white = board.current_player();
        let castles: Vec<String> = white
            .legal_moves()
            .iter()
            .filter(|mv| mv.is_castle())
            .map(ToString::to_string)
            .collect();
        assert_eq!(castles, vec!["O-O", "O-O-O"]);
        assert_eq!(
            white.calculate_king_castles(white.opponent().legal_moves()).len(),
            2
        );

        // A black rook on f8 covers f1; king side is gone, queen side stays.
        let board = parse_fen("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1").expect("FEN should parse");
        let castles: Vec<String> = board
            .current_player()
            .legal_moves()
            .iter()
            .filter(|mv| mv.is_castle())
            .map(ToString::to_string)
            .collect();
        assert_eq!(castles, vec!["O-O-O"]);
    }

    fn castles(board: &Board, color: Color) -> Vec<String> {
        board
            .player(color)
            .legal_moves()
            .iter()
            .filter(|mv| mv.is_castle())
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn castling_opens_once_the_back_rank_clears() {
        let mut board = Board::create_standard_board();
        assert!(castles(&board, Color::White).is_empty());
        let opening = [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "c4"),
            ("g8", "f6"),
        ];
        for (from, to) in opening {
            board = play(&board, from, to);
        }
        assert_eq!(castles(&board, Color::White), vec!["O-O"]);

        let castled = play(&board, "e1", "g1");
        let king = castled.piece_at(Coord::new(7, 6)).expect("king should be on g1");
        let rook = castled.piece_at(Coord::new(7, 5)).expect("rook should be on f1");
        assert!(king.is_castled());
        assert!(!rook.is_first_move());

        // The h1 rook steps away and back; the king side right does not return.
        let board = play(&board, "h1", "g1");
        let board = play(&board, "f8", "c5");
        let board = play(&board, "g1", "h1");
        let board = play(&board, "c6", "d4");
        assert!(castles(&board, Color::White).is_empty());
        assert_eq!(castles(&board, Color::Black), vec!["O-O"]);
    }

    #[test]
    fn pawn_diagonals_block_castling() {
        // The black pawn on e2 attacks f1 and d1 even though it has no capture there.
        let board = parse_fen("4k3/8/8/8/8/8/4p3/R3K2R w KQ - 0 1").expect("FEN should parse");
        let white = board.current_player();
        assert!(white.is_tile_attacked(Coord::new(7, 5)));
        assert!(white.legal_moves().iter().all(|mv| !mv.is_castle()));
    }

    #[test]
    fn castling_moves_king_and_rook_and_is_permanent() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let castle = Move::create_from_squares(&board, "e1", "g1").expect("squares parse");
        assert!(matches!(castle, Move::KingSideCastle { .. }));
        let after = play(&board, "e1", "g1");
        let king = after.piece_at(Coord::new(7, 6)).expect("king should be on g1");
        let rook = after.piece_at(Coord::new(7, 5)).expect("rook should be on f1");
        assert!(king.is_castled());
        assert!(!rook.is_first_move());
        assert!(after.white_player().is_castled());
        assert!(!after.white_player().is_queen_side_castle_allowed());
    }

    #[test]
    fn moving_a_rook_loses_that_side_for_good() {
        let board = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let board = play(&board, "h1", "h2");
        let board = play(&board, "a8", "a7");
        let board = play(&board, "h2", "h1");
        let board = play(&board, "a7", "a8");

        let white_castles: Vec<String> = board
            .current_player()
            .legal_moves()
            .iter()
            .filter(|mv| mv.is_castle())
            .map(ToString::to_string)
            .collect();
        assert_eq!(white_castles, vec!["O-O-O"]);
        let black = board.black_player();
        assert!(black.legal_moves().iter().all(|mv| !matches!(mv, Move::QueenSideCastle { .. })));
    }

    #[test]
    fn attack_moves_on_tile_ignore_pawn_pushes() {
        let board = Board::create_standard_board();
        let white = board.current_player();
        // e5 is reachable by the e7 pawn only by a push.
        assert!(white.calculate_attack_moves_on_tile(Coord::new(3, 4)).is_empty());
        // f6 is covered by the g8 knight.
        assert_eq!(white.calculate_attack_moves_on_tile(Coord::new(2, 5)).len(), 1);
    }
}
