//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by board construction,
//! move execution and the notation utilities. Illegal move *attempts* are not
//! errors: `Player::play_move` reports them through `MoveStatus`, and a search
//! that runs out of time reports it through `SearchResult::cancelled`.
//!
//! Usage guidelines:
//! - `MissingKing` and `NullMoveExecution` mean the caller handed the engine
//!   something it must never receive (a malformed position, or the sentinel
//!   move returned when no legal move matched). They are not meant to be
//!   recovered from during normal play.
//! - `InvalidSquare`, `InvalidFen` and `InvalidPromotion` describe bad user
//!   input and are suitable for presenting back to the user.

use thiserror::Error;

use crate::board::chess_types::{Color, PieceKind};

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A board was assembled without a king for the given side.
    #[error("no {0} king found on the board")]
    MissingKing(Color),

    /// The sentinel null move was executed.
    #[error("cannot execute a null move")]
    NullMoveExecution,

    /// A square name could not be parsed (expected `a1`..`h8`).
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    /// A FEN record could not be parsed.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Pawns may only promote to a knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

pub type ChessResult<T> = Result<T, ChessError>;
