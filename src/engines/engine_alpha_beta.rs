//! The main search bot: alpha-beta with root move ordering and a time budget.

use std::time::Duration;

use crate::board::board::Board;
use crate::engines::engine_trait::Bot;
use crate::move_generation::chess_move::Move;
use crate::search::alpha_beta::{alpha_beta_search, SearchConfig, SearchResult};
use crate::search::board_scoring::{BoardEvaluator, EnhancedEvaluator};

pub struct AlphaBetaBot<E: BoardEvaluator = EnhancedEvaluator> {
    evaluator: E,
    config: SearchConfig,
    last_result: Option<SearchResult>,
}

impl<E: BoardEvaluator> AlphaBetaBot<E> {
    pub fn new(evaluator: E, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            last_result: None,
        }
    }

    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.config.think_time = think_time;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent `execute` call.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }
}

impl Default for AlphaBetaBot<EnhancedEvaluator> {
    fn default() -> Self {
        Self::new(EnhancedEvaluator::new(), SearchConfig::default())
    }
}

impl<E: BoardEvaluator> Bot for AlphaBetaBot<E> {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn execute(&mut self, board: &Board, depth: u8) -> Option<Move> {
        let config = SearchConfig {
            max_depth: depth.max(1),
            ..self.config
        };
        let result = alpha_beta_search(board, &self.evaluator, config);
        log::info!(
            "{} bot: {} ms, {} positions, depth {}{}, best evaluation {}",
            board.side_to_move().tag(),
            result.elapsed.as_millis(),
            result.nodes,
            result.completed_depth,
            if result.cancelled { " (out of time)" } else { "" },
            result.best_score
        );
        let best = result.best_move.clone();
        self.last_result = Some(result);
        best
    }

    fn observe(&mut self, before: &Board, mv: &Move, after: &Board) {
        self.evaluator.observe(before, mv, after);
    }
}
