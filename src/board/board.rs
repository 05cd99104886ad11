//! Immutable board snapshot.
//!
//! A board is built once from a [`BoardConfig`] and never changes afterwards.
//! Building it also derives both sides' [`PlayerState`], so legality, check
//! and castling rights are settled at construction time. Executing a move
//! produces a new board.

use std::fmt;

use crate::board::board_config::BoardConfig;
use crate::board::chess_rules::{
    KING_HOME_FILE, KING_SIDE_ROOK_FILE, NUM_FILES, NUM_RANKS, NUM_TILES, QUEEN_SIDE_ROOK_FILE,
};
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::board::tile::Tile;
use crate::errors::ChessResult;
use crate::move_generation::chess_move::Move;
use crate::move_generation::player::{Player, PlayerState};
use crate::pieces::piece::Piece;

#[derive(Debug, Clone)]
pub struct Board {
    tiles: [Tile; NUM_TILES],
    pieces: [Vec<Piece>; 2],
    players: [PlayerState; 2],
    side_to_move: Color,
    jumped_pawn: Option<Piece>,
    en_passant_pawn: Option<Piece>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Board {
    pub(crate) fn from_config(config: &BoardConfig) -> ChessResult<Board> {
        let mut tiles = [Tile::Empty; NUM_TILES];
        let mut pieces: [Vec<Piece>; 2] = [Vec::with_capacity(16), Vec::with_capacity(16)];
        for (tile, slot) in tiles.iter_mut().zip(config.placement()) {
            *tile = Tile::from(*slot);
            if let Some(piece) = slot {
                pieces[piece.color().index()].push(*piece);
            }
        }

        let mut board = Board {
            tiles,
            pieces,
            players: [
                PlayerState::pending(Color::White),
                PlayerState::pending(Color::Black),
            ],
            side_to_move: config.side_to_move(),
            jumped_pawn: config.jumped_pawn().copied(),
            en_passant_pawn: config.en_passant_pawn().copied(),
            halfmove_clock: config.halfmove_clock(),
            fullmove_number: config.fullmove_number(),
        };

        let white_moves = board.pseudo_legal_moves(Color::White);
        let black_moves = board.pseudo_legal_moves(Color::Black);
        let white = PlayerState::new(&board, Color::White, &white_moves, &black_moves)?;
        let black = PlayerState::new(&board, Color::Black, &black_moves, &white_moves)?;
        board.players = [white, black];
        Ok(board)
    }

    /// The standard opening position, White to move.
    pub fn create_standard_board() -> Board {
        BoardConfig::standard()
            .build()
            .expect("standard layout always contains both kings")
    }

    /// A configuration with no pieces on it. Place at least both kings before
    /// building.
    pub fn create_empty_board() -> BoardConfig {
        BoardConfig::new()
    }

    /// Every candidate move of `color`, ignoring castling and king safety.
    fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for piece in &self.pieces[color.index()] {
            piece.push_candidates(self, &mut moves);
        }
        moves
    }

    #[inline]
    pub fn tile(&self, at: Coord) -> &Tile {
        &self.tiles[at.index()]
    }

    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.tiles[at.index()].piece()
    }

    #[inline]
    pub fn active_pieces(&self, color: Color) -> &[Piece] {
        &self.pieces[color.index()]
    }

    /// White pieces followed by black pieces.
    pub fn all_active_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces[0].iter().chain(self.pieces[1].iter())
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

    pub fn player(&self, color: Color) -> Player<'_> {
        Player::new(self, &self.players[color.index()])
    }

    pub fn current_player(&self) -> Player<'_> {
        self.player(self.side_to_move)
    }

    pub fn white_player(&self) -> Player<'_> {
        self.player(Color::White)
    }

    pub fn black_player(&self) -> Player<'_> {
        self.player(Color::Black)
    }

    /// Castling rights that can still be used at some point, in FEN order:
    /// White king side, White queen side, Black king side, Black queen side.
    /// A right survives while the king and that rook both stand unmoved.
    pub fn castling_rights(&self) -> [bool; 4] {
        let mut rights = [false; 4];
        for color in Color::ALL {
            let king = self.player(color).king();
            let rank = color.back_rank();
            let king_at_home =
                king.is_first_move() && king.position() == Coord::new(rank, KING_HOME_FILE);
            let rook_at_home = |file: u8| {
                self.piece_at(Coord::new(rank, file)).is_some_and(|rook| {
                    rook.kind() == PieceKind::Rook && rook.color() == color && rook.is_first_move()
                })
            };
            let base = color.index() * 2;
            rights[base] = king_at_home
                && king.is_king_side_castle_allowed()
                && rook_at_home(KING_SIDE_ROOK_FILE);
            rights[base + 1] = king_at_home
                && king.is_queen_side_castle_allowed()
                && rook_at_home(QUEEN_SIDE_ROOK_FILE);
        }
        rights
    }

    /// Checkmate or stalemate for the side to move.
    pub fn is_game_over(&self) -> bool {
        let player = self.current_player();
        player.is_in_checkmate() || player.is_in_stalemate()
    }

    /// The configuration this board was built from.
    pub fn to_config(&self) -> BoardConfig {
        let mut config = BoardConfig::new();
        for piece in self.all_active_pieces() {
            config.set_piece(*piece);
        }
        config
            .set_side_to_move(self.side_to_move)
            .set_jumped_pawn(self.jumped_pawn)
            .set_en_passant_pawn(self.en_passant_pawn)
            .set_halfmove_clock(self.halfmove_clock)
            .set_fullmove_number(self.fullmove_number);
        config
    }

    /// Rank by rank from Black's back rank, every tile right-aligned in three
    /// columns: uppercase White, lowercase Black, `-` for empty.
    pub fn to_display_string(&self) -> String {
        let mut out = String::with_capacity(NUM_TILES * 3 + NUM_RANKS);
        for rank in 0..NUM_RANKS {
            for file in 0..NUM_FILES {
                let tile = self.tile(Coord::new(rank as u8, file as u8));
                out.push_str(&format!("{tile:>3}"));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}
