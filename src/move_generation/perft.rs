//! Move-path enumeration used to verify move generation.
//!
//! Every move is pushed through `play_move`, so the counts reflect the same
//! two-phase legality the search uses. Promotions are expanded to all four
//! target pieces to match the published reference counts.

use crate::board::board::Board;
use crate::board::chess_types::PieceKind;
use crate::move_generation::chess_move::Move;

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, mv: &Move, after: &Board) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.is_en_passant() {
            self.en_passant += 1;
        }
        if mv.is_castle() {
            self.castles += 1;
        }
        if mv.is_promotion() {
            self.promotions += 1;
        }
        let defender = after.current_player();
        if defender.is_in_check() {
            self.checks += 1;
            if defender.is_in_checkmate() {
                self.checkmates += 1;
            }
        }
    }
}

/// Counts leaf nodes `depth` plies below `board`, with statistics about the
/// moves that reach them.
pub fn perft(board: &Board, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    perft_recurse(board, depth, &mut total);
    total
}

/// Node count below each root move, keyed by its notation.
pub fn perft_divide(board: &Board, depth: u8) -> Vec<(String, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    let player = board.current_player();
    let mut out = Vec::new();
    for mv in expanded_moves(player.legal_moves()) {
        let transition = player.play_move(&mv);
        if transition.status().is_done() {
            out.push((mv.to_string(), perft(transition.board(), depth - 1).nodes));
        }
    }
    out
}

fn perft_recurse(board: &Board, depth: u8, counts: &mut PerftCounts) {
    let player = board.current_player();
    for mv in expanded_moves(player.legal_moves()) {
        let transition = player.play_move(&mv);
        if !transition.status().is_done() {
            continue;
        }
        if depth == 1 {
            counts.record_leaf(&mv, transition.board());
        } else {
            let mut child = PerftCounts::default();
            perft_recurse(transition.board(), depth - 1, &mut child);
            counts.merge(child);
        }
    }
}

fn expanded_moves(moves: &[Move]) -> Vec<Move> {
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        if mv.is_promotion() {
            out.extend(
                PROMOTION_KINDS
                    .iter()
                    .filter_map(|kind| mv.with_promotion_kind(*kind).ok()),
            );
        } else {
            out.push(mv.clone());
        }
    }
    out
}
