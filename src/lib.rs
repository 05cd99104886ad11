//! Crate root module declarations for the ply_chess engine.
//!
//! This file exposes all top-level subsystems (board model, pieces, move
//! generation and legality, search, bots, and notation helpers) so the
//! self-play binary, benches, and external tooling can import stable module
//! paths.

pub mod errors;

pub mod board {
    pub mod board;
    pub mod board_config;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod tile;
}

pub mod pieces {
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece;
    pub mod piece_shared;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod chess_move;
    pub mod move_factory;
    pub mod perft;
    pub mod player;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_alpha_beta;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
}
