//! Board-to-FEN export.

use crate::board::board::Board;
use crate::board::chess_rules::{NUM_FILES, NUM_RANKS};
use crate::board::chess_types::{Color, Coord};

pub fn generate_fen(board: &Board) -> String {
    let placement = generate_board_field(board);
    let side_to_move = match board.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(board.castling_rights());
    let en_passant = generate_en_passant_field(board);

    format!(
        "{} {} {} {} {} {}",
        placement,
        side_to_move,
        castling,
        en_passant,
        board.halfmove_clock(),
        board.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    // Row 0 is rank 8, which FEN lists first.
    for rank in 0..NUM_RANKS {
        let mut empty_count = 0u8;

        for file in 0..NUM_FILES {
            match board.piece_at(Coord::new(rank as u8, file as u8)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push_str(&piece.to_string());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank + 1 < NUM_RANKS {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: [bool; 4]) -> String {
    let out: String = rights
        .iter()
        .zip(['K', 'Q', 'k', 'q'])
        .filter(|(held, _)| **held)
        .map(|(_, letter)| letter)
        .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

/// The square a pawn skipped on the previous move.
fn generate_en_passant_field(board: &Board) -> String {
    board
        .jumped_pawn()
        .and_then(|pawn| pawn.position().offset(-pawn.color().direction(), 0))
        .map_or_else(|| "-".to_owned(), |target| target.to_string())
}
