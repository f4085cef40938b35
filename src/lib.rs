//! Crate root module declarations for the Rowan Chess rules engine.
//!
//! This file exposes all top-level subsystems (board model, per-piece move
//! rules, game-state transitions, and notation handling) so binaries, tests,
//! and external tooling can import stable module paths.

pub mod errors;

pub mod board {
    pub mod piece;
    pub mod piece_move;
    pub mod position;
    pub mod square;
}

pub mod rules {
    pub mod attacks;
    pub mod castling;
    pub mod legal_moves;
    pub mod moves_king;
    pub mod moves_knight;
    pub mod moves_pawn;
    pub mod moves_sliding;
}

pub mod game {
    pub mod detect;
    pub mod draw;
    pub mod game;
    pub mod stage;
}

pub mod notation {
    pub mod algebraic;
    pub mod fen;
    pub mod pgn;
    pub mod san;
}
