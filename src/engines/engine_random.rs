//! Random-move bot.
//!
//! Selects uniformly from the moves that survive `play_move` and is primarily
//! used for diagnostics, self-play smoke runs and low-strength games.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::board::Board;
use crate::engines::engine_trait::Bot;
use crate::move_generation::chess_move::Move;

pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// A bot that replays the same choices for the same positions.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "Random"
    }

    fn execute(&mut self, board: &Board, _depth: u8) -> Option<Move> {
        let player = board.current_player();
        let playable: Vec<&Move> = player
            .legal_moves()
            .iter()
            .filter(|mv| player.play_move(mv).status().is_done())
            .collect();
        log::debug!("random bot choosing among {} moves", playable.len());
        playable.choose(&mut self.rng).map(|mv| (*mv).clone())
    }
}
