//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.

use crate::board::board::Board;
use crate::board::chess_rules::{CASTLE_BONUS, CHECKMATE_BONUS, CHECK_BONUS, DRAW_PENALTY};
use crate::move_generation::chess_move::Move;
use crate::move_generation::player::Player;
use crate::search::zobrist::{compute_full_hash, update_hash};

pub trait BoardEvaluator {
    /// Score from the perspective of the side to move.
    fn evaluate(&self, board: &Board) -> i32;

    /// Called once for every move actually played in the game.
    fn observe(&mut self, _before: &Board, _mv: &Move, _after: &Board) {}
}

/// Converts a side-to-move score into one where positive favors White.
#[inline]
pub fn white_relative_score(board: &Board, score: i32) -> i32 {
    if board.side_to_move().is_white() {
        score
    } else {
        -score
    }
}

#[inline]
fn material(player: &Player<'_>) -> i32 {
    player.active_pieces().iter().map(|piece| piece.value()).sum()
}

/// Material, check and mate bonuses, plus mobility of the side to move.
fn standard_score(board: &Board) -> i32 {
    let player = board.current_player();
    let opponent = player.opponent();

    let mut score = material(&player) - material(&opponent);
    if opponent.is_in_check() {
        score += CHECK_BONUS;
        if opponent.is_in_checkmate() {
            score += CHECKMATE_BONUS;
        }
    }
    if player.is_in_checkmate() {
        score -= CHECKMATE_BONUS;
    }
    score + player.legal_moves().len() as i32
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl BoardEvaluator for StandardEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        standard_score(board)
    }
}

/// Standard scoring plus a bonus when the side to move has castled, with a
/// record of the game's position hashes for repetition detection.
#[derive(Debug, Clone, Default)]
pub struct EnhancedEvaluator {
    history: Vec<u64>,
    current_hash: Option<u64>,
    draw_penalty: bool,
}

impl EnhancedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Penalize stalemates and positions that would repeat a third time.
    pub fn with_draw_penalty(mut self, enabled: bool) -> Self {
        self.draw_penalty = enabled;
        self
    }

    pub fn history(&self) -> &[u64] {
        &self.history
    }

    /// How many times `hash` occurred in the observed game.
    pub fn occurrences(&self, hash: u64) -> usize {
        self.history.iter().filter(|seen| **seen == hash).count()
    }

    /// Whether the latest observed position has now occurred three times.
    pub fn is_threefold_repetition(&self) -> bool {
        self.current_hash
            .is_some_and(|hash| self.occurrences(hash) >= 3)
    }

    fn is_draw(&self, board: &Board) -> bool {
        // Search nodes are not in the history yet, so two earlier
        // occurrences make this one the third.
        board.current_player().is_in_stalemate() || self.occurrences(compute_full_hash(board)) >= 2
    }
}

impl BoardEvaluator for EnhancedEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let player = board.current_player();
        let mut score = standard_score(board);
        if player.is_castled() {
            score += CASTLE_BONUS;
        }
        if self.draw_penalty && self.is_draw(board) {
            score += DRAW_PENALTY;
        }
        score
    }

    fn observe(&mut self, before: &Board, mv: &Move, after: &Board) {
        let hash = match self.current_hash {
            Some(hash) => update_hash(hash, mv, before, after),
            None => {
                self.history.push(compute_full_hash(before));
                compute_full_hash(after)
            }
        };
        self.history.push(hash);
        self.current_hash = Some(hash);
        log::debug!("observed {mv}, hash {hash:016x}");
    }
}
