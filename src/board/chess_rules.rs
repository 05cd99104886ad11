//! Canonical chess-rule constants.
//!
//! Board geometry, the home files used by castling and the fixed bonuses the
//! evaluators add on top of material.

pub const NUM_RANKS: usize = 8;
pub const NUM_FILES: usize = 8;
pub const NUM_TILES: usize = NUM_RANKS * NUM_FILES;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_HOME_FILE: u8 = 4;
pub const KING_SIDE_ROOK_FILE: u8 = 7;
pub const QUEEN_SIDE_ROOK_FILE: u8 = 0;

/// Bonus for leaving the opponent in check.
pub const CHECK_BONUS: i32 = 100;
/// Bonus (or penalty, negated) for a mated side. Dwarfs every material term.
pub const CHECKMATE_BONUS: i32 = 100_000;
pub const CASTLE_BONUS: i32 = 60;
pub const DRAW_PENALTY: i32 = -1_000;
