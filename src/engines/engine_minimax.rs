//! Exhaustive negamax bot without pruning or a clock.

use crate::board::board::Board;
use crate::engines::engine_trait::Bot;
use crate::move_generation::chess_move::Move;
use crate::search::alpha_beta::negamax_search;
use crate::search::board_scoring::{BoardEvaluator, StandardEvaluator};

pub struct MinimaxBot<E: BoardEvaluator = StandardEvaluator> {
    evaluator: E,
}

impl<E: BoardEvaluator> MinimaxBot<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl Default for MinimaxBot<StandardEvaluator> {
    fn default() -> Self {
        Self::new(StandardEvaluator)
    }
}

impl<E: BoardEvaluator> Bot for MinimaxBot<E> {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn execute(&mut self, board: &Board, depth: u8) -> Option<Move> {
        let result = negamax_search(board, &self.evaluator, depth.max(1));
        log::info!(
            "{} bot: {} ms, {} positions, best evaluation {}",
            board.side_to_move().tag(),
            result.elapsed.as_millis(),
            result.nodes,
            result.best_score
        );
        result.best_move
    }

    fn observe(&mut self, before: &Board, mv: &Move, after: &Board) {
        self.evaluator.observe(before, mv, after);
    }
}

#[cfg(test)]
mod tests {
    use super::MinimaxBot;
    use crate::engines::engine_trait::Bot;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn minimax_bot_takes_the_free_queen() {
        let board = parse_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").expect("FEN should parse");
        let mut bot: MinimaxBot = MinimaxBot::default();
        let mv = bot.execute(&board, 2).expect("a move should be found");
        assert_eq!(mv.to_string(), "Rxd5");
    }
}
