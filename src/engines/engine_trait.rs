//! Bot abstraction used by the self-play driver.
//!
//! Every move picker, from the random mover to the pruned search, sits behind
//! one trait so the driver can pair any two of them.

use crate::board::board::Board;
use crate::move_generation::chess_move::Move;

pub trait Bot {
    fn name(&self) -> &str;

    /// Picks a move for the side to move on `board`, searching up to `depth`
    /// plies. `None` means the side to move has no legal move.
    fn execute(&mut self, board: &Board, depth: u8) -> Option<Move>;

    /// Called after every move played in the game, by either side.
    fn observe(&mut self, _before: &Board, _mv: &Move, _after: &Board) {}
}
