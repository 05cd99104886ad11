//! Zobrist hashing support for fast position identity and repetition tracking.
//!
//! The keys are drawn from a seeded `StdRng`, so hashes are deterministic
//! across runs, which is useful for testing and debugging. Castling rights and
//! the en-passant file are part of the key in both the full and the
//! incremental path.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::board::Board;
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::move_generation::chess_move::Move;
use crate::pieces::piece::Piece;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Return the Zobrist key for a `(color, piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, piece: PieceKind, square: Coord) -> u64 {
    tables().piece_square[color.index()][piece.index()][square.index()]
}

#[inline]
fn piece_key(piece: &Piece) -> u64 {
    piece_square_key(piece.color(), piece.kind(), piece.position())
}

/// Return the side-to-move toggle key (xor in when Black is to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Combined key of every castling right still held on `board`.
pub fn castling_key(board: &Board) -> u64 {
    board
        .castling_rights()
        .iter()
        .zip(tables().castling.iter())
        .filter(|(held, _)| **held)
        .fold(0, |key, (_, right)| key ^ right)
}

/// Key of the file a pawn just jumped on, or 0 when en passant is not available.
pub fn en_passant_key(board: &Board) -> u64 {
    board
        .jumped_pawn()
        .map_or(0, |pawn| tables().en_passant_file[pawn.position().file as usize])
}

/// Compute the full position Zobrist key from scratch.
pub fn compute_full_hash(board: &Board) -> u64 {
    let mut key = board.all_active_pieces().fold(0u64, |key, piece| key ^ piece_key(piece));

    if board.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^ castling_key(board) ^ en_passant_key(board)
}

/// Derives the key of `after` from the key of `before` and the move between
/// them, touching only the terms the move changes.
pub fn update_hash(hash: u64, mv: &Move, before: &Board, after: &Board) -> u64 {
    let mut key = hash ^ side_to_move_key();

    if let (Some(piece), Some(destination)) = (mv.moved_piece(), mv.destination()) {
        key ^= piece_key(piece);
        if let Some(captured) = mv.captured_piece() {
            key ^= piece_key(captured);
        }
        // The landed piece may be a promotion, so read it back from the new board.
        if let Some(landed) = after.piece_at(destination) {
            key ^= piece_key(landed);
        }
    }

    if let Some(rook) = mv.castle_rook() {
        key ^= piece_key(rook);
        if let Move::KingSideCastle {
            rook_destination, ..
        }
        | Move::QueenSideCastle {
            rook_destination, ..
        } = mv
        {
            key ^= piece_square_key(rook.color(), PieceKind::Rook, *rook_destination);
        }
    }

    key ^= castling_key(before) ^ castling_key(after);
    key ^ en_passant_key(before) ^ en_passant_key(after)
}
