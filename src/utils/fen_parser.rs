//! FEN-to-Board parser.
//!
//! The structural inverse of `generate_fen`: pieces, side to move, castling
//! rights and the en-passant target are turned into a `BoardConfig` and built.
//! First-move flags are not part of FEN, so they are inferred: pawns on their
//! home rank, and rooks and kings that still hold a castling right.

use crate::board::board::Board;
use crate::board::board_config::BoardConfig;
use crate::board::chess_rules::{
    KING_HOME_FILE, KING_SIDE_ROOK_FILE, NUM_FILES, QUEEN_SIDE_ROOK_FILE,
};
use crate::board::chess_types::{Color, Coord, PieceKind};
use crate::errors::{ChessError, ChessResult};
use crate::pieces::piece::Piece;
use crate::utils::algebraic::square_to_coord;

#[derive(Debug, Clone, Copy, Default)]
struct CastlingRights {
    king_side: [bool; 2],
    queen_side: [bool; 2],
}

fn invalid(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

/// Parses a FEN record. The halfmove and fullmove fields may be omitted and
/// default to `0` and `1`.
pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let side_to_move = parse_side_to_move(side_part)?;
    let rights = parse_castling_rights(castling_part)?;

    let mut config = BoardConfig::new();
    for (color, kind, at) in parse_board(board_part)? {
        config.set_piece(infer_piece(color, kind, at, rights));
    }
    config.set_side_to_move(side_to_move);

    let jumped_pawn = parse_en_passant(en_passant_part, side_to_move, &config)?;
    config.set_jumped_pawn(jumped_pawn);

    if let Some(halfmove) = halfmove_part {
        let halfmove = halfmove
            .parse::<u32>()
            .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove}")))?;
        config.set_halfmove_clock(halfmove);
    }
    if let Some(fullmove) = fullmove_part {
        let fullmove = fullmove
            .parse::<u32>()
            .map_err(|_| invalid(format!("invalid fullmove number: {fullmove}")))?;
        config.set_fullmove_number(fullmove);
    }

    config.build()
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Color, PieceKind, Coord)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut pieces = Vec::with_capacity(32);
    for (rank, rank_str) in ranks.iter().enumerate() {
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;

            if file >= NUM_FILES {
                return Err(invalid("board rank has too many files"));
            }

            pieces.push((color, kind, Coord::new(rank as u8, file as u8)));
            file += 1;
        }

        if file != NUM_FILES {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(pieces)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    PieceKind::from_letter(ch).map(|kind| (color, kind))
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.king_side[Color::White.index()] = true,
            'Q' => rights.queen_side[Color::White.index()] = true,
            'k' => rights.king_side[Color::Black.index()] = true,
            'q' => rights.queen_side[Color::Black.index()] = true,
            _ => return Err(invalid(format!("invalid castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn infer_piece(color: Color, kind: PieceKind, at: Coord, rights: CastlingRights) -> Piece {
    let back_rank = at.rank == color.back_rank();
    let king_side = rights.king_side[color.index()];
    let queen_side = rights.queen_side[color.index()];

    match kind {
        PieceKind::King => {
            let at_home = back_rank && at.file == KING_HOME_FILE;
            Piece::king(color, at, at_home && king_side, at_home && queen_side)
        }
        PieceKind::Rook => {
            let unmoved = back_rank
                && ((at.file == KING_SIDE_ROOK_FILE && king_side)
                    || (at.file == QUEEN_SIDE_ROOK_FILE && queen_side));
            Piece::new(kind, color, at).with_first_move(unmoved)
        }
        PieceKind::Pawn => {
            Piece::new(kind, color, at).with_first_move(at.rank == color.pawn_home_rank())
        }
        _ => Piece::new(kind, color, at).with_first_move(back_rank),
    }
}

/// The pawn that skipped over the target square, which belongs to the side
/// that just moved.
fn parse_en_passant(
    en_passant_part: &str,
    side_to_move: Color,
    config: &BoardConfig,
) -> ChessResult<Option<Piece>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = square_to_coord(en_passant_part)?;
    let jumper = side_to_move.opposite();
    let pawn = target
        .offset(jumper.direction(), 0)
        .and_then(|at| config.piece_at(at))
        .filter(|piece| piece.kind() == PieceKind::Pawn && piece.color() == jumper)
        .ok_or_else(|| {
            invalid(format!(
                "no pawn passed over en-passant square {en_passant_part}"
            ))
        })?;

    Ok(Some(*pawn))
}
