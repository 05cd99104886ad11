//! Time-bounded negamax search with alpha-beta pruning.
//!
//! The root orders its moves once with a cheap capture/promotion heuristic and
//! then deepens one ply at a time. Every node checks the wall-clock deadline
//! before expanding; once it passes, the search unwinds and the result of the
//! last fully completed depth is returned.

use std::time::{Duration, Instant};

use crate::board::board::Board;
use crate::move_generation::chess_move::Move;
use crate::search::board_scoring::BoardEvaluator;

pub const POS_INFINITY: i32 = i32::MAX - 1;
pub const NEG_INFINITY: i32 = -POS_INFINITY;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub think_time: Duration,
    /// Search depths `1..=max_depth` in turn instead of `max_depth` alone.
    pub iterative_deepening: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            think_time: Duration::from_millis(1000),
            iterative_deepening: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub completed_depth: u8,
    pub nodes: u64,
    /// The deadline passed before `max_depth` was completed.
    pub cancelled: bool,
    pub elapsed: Duration,
}

/// A root move with the board it leads to and its ordering score.
#[derive(Debug, Clone)]
struct RootEntry {
    mv: Move,
    next: Board,
    order: i32,
}

struct SearchContext<'e, E: BoardEvaluator> {
    evaluator: &'e E,
    deadline: Instant,
    nodes: u64,
    cancelled: bool,
}

impl<E: BoardEvaluator> SearchContext<'_, E> {
    /// Static score, nudged so that a mate closer to the root is worth more to
    /// the side delivering it.
    fn static_score(&self, board: &Board, ply: u8) -> i32 {
        let score = self.evaluator.evaluate(board);
        if board.current_player().is_in_checkmate() {
            score + i32::from(ply)
        } else {
            score
        }
    }

    fn negamax(&mut self, board: &Board, depth: u8, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        self.nodes += 1;
        if Instant::now() >= self.deadline {
            self.cancelled = true;
            return self.evaluator.evaluate(board);
        }

        let player = board.current_player();
        if depth == 0 || player.is_in_checkmate() || player.is_in_stalemate() {
            return self.static_score(board, ply);
        }

        for mv in player.legal_moves() {
            let transition = player.play_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            let score = -self.negamax(transition.board(), depth - 1, -beta, -alpha, ply + 1);
            if self.cancelled {
                return self.evaluator.evaluate(board);
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }
        alpha
    }

    fn search_root(&mut self, entries: &mut [RootEntry], depth: u8) -> (Option<Move>, i32) {
        let mut alpha = NEG_INFINITY;
        let beta = POS_INFINITY;
        let mut best_move = None;

        for index in 0..entries.len() {
            pick_best(entries, index);
            let entry = &entries[index];
            let score = -self.negamax(&entry.next, depth - 1, -beta, -alpha, 1);
            if self.cancelled {
                break;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(entry.mv.clone());
            }
        }
        (best_move, alpha)
    }
}

/// Ordering heuristic for a move that has already been played into `after`:
/// favour winning captures and promotions, and avoid landing on an attacked
/// square.
fn score_move(mv: &Move, after: &Board) -> i32 {
    let Some(mover) = mv.moved_piece() else {
        return 0;
    };
    let mut score = 0;
    if let Some(captured) = mv.captured_piece() {
        score += 10 * (captured.value() - mover.value());
    }
    if let Some(kind) = mv.promotion_kind() {
        score += kind.value();
    }
    if let Some(destination) = mv.destination() {
        if after.player(mover.color()).is_tile_attacked(destination) {
            score -= mover.value();
        }
    }
    score
}

fn order_moves(board: &Board) -> Vec<RootEntry> {
    let player = board.current_player();
    player
        .legal_moves()
        .iter()
        .filter_map(|mv| {
            let transition = player.play_move(mv);
            if !transition.status().is_done() {
                return None;
            }
            let next = transition.into_board();
            let order = score_move(mv, &next);
            Some(RootEntry {
                mv: mv.clone(),
                next,
                order,
            })
        })
        .collect()
}

/// One selection-sort step: moves the best remaining entry to `start`.
/// Ties keep the first one encountered.
fn pick_best(entries: &mut [RootEntry], start: usize) {
    let mut best = start;
    for index in start + 1..entries.len() {
        if entries[index].order > entries[best].order {
            best = index;
        }
    }
    entries.swap(start, best);
}

/// Searches `board` for the side to move.
///
/// The returned move is `None` only when the side to move has no legal move.
/// If the deadline cuts a depth short, the result of the previous depth is
/// kept; if not even depth one finished, the best move found so far (or the
/// best-ordered move) is returned.
pub fn alpha_beta_search<E: BoardEvaluator>(
    board: &Board,
    evaluator: &E,
    config: SearchConfig,
) -> SearchResult {
    let start = Instant::now();
    let mut result = SearchResult::default();

    let mut entries = order_moves(board);
    if entries.is_empty() {
        result.best_score = evaluator.evaluate(board);
        result.nodes = 1;
        result.elapsed = start.elapsed();
        return result;
    }

    let mut ctx = SearchContext {
        evaluator,
        deadline: start + config.think_time,
        nodes: 0,
        cancelled: false,
    };

    // A zero depth still searches one ply so that a move comes back.
    let max_depth = config.max_depth.max(1);
    let first_depth = if config.iterative_deepening {
        1
    } else {
        max_depth
    };

    for depth in first_depth..=max_depth {
        let (best_move, best_score) = ctx.search_root(&mut entries, depth);
        if ctx.cancelled {
            log::debug!("search cancelled during depth {depth} after {} nodes", ctx.nodes);
            if result.best_move.is_none() {
                result.best_move = best_move;
                result.best_score = best_score;
            }
            break;
        }
        log::debug!(
            "depth {depth} complete: best {} score {best_score} nodes {}",
            best_move.as_ref().map_or_else(|| "--".to_owned(), ToString::to_string),
            ctx.nodes
        );
        result.best_move = best_move;
        result.best_score = best_score;
        result.completed_depth = depth;
    }

    if result.best_move.is_none() {
        pick_best(&mut entries, 0);
        result.best_move = Some(entries[0].mv.clone());
        result.best_score = -evaluator.evaluate(&entries[0].next);
    }

    result.nodes = ctx.nodes;
    result.cancelled = ctx.cancelled;
    result.elapsed = start.elapsed();
    result
}

fn plain_negamax<E: BoardEvaluator>(
    board: &Board,
    evaluator: &E,
    depth: u8,
    ply: u8,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    let player = board.current_player();
    if depth == 0 || player.is_in_checkmate() || player.is_in_stalemate() {
        let score = evaluator.evaluate(board);
        return if player.is_in_checkmate() {
            score + i32::from(ply)
        } else {
            score
        };
    }

    let mut best = NEG_INFINITY;
    for mv in player.legal_moves() {
        let transition = player.play_move(mv);
        if transition.status().is_done() {
            let score = -plain_negamax(transition.board(), evaluator, depth - 1, ply + 1, nodes);
            best = best.max(score);
        }
    }
    best
}

/// Exhaustive negamax without pruning or a time limit. Slow, but a useful
/// reference for the pruned search.
pub fn negamax_search<E: BoardEvaluator>(board: &Board, evaluator: &E, depth: u8) -> SearchResult {
    let start = Instant::now();
    let mut result = SearchResult {
        best_score: NEG_INFINITY,
        ..SearchResult::default()
    };
    let player = board.current_player();

    if depth > 0 {
        for mv in player.legal_moves() {
            let transition = player.play_move(mv);
            if !transition.status().is_done() {
                continue;
            }
            let score =
                -plain_negamax(transition.board(), evaluator, depth - 1, 1, &mut result.nodes);
            if score > result.best_score {
                result.best_score = score;
                result.best_move = Some(mv.clone());
            }
        }
    }

    if result.best_move.is_none() {
        result.best_score = evaluator.evaluate(board);
    } else {
        result.completed_depth = depth;
    }
    result.elapsed = start.elapsed();
    result
}
