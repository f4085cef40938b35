//! Errors used throughout the rules engine.
//!
//! `ChessError` is the single error type across the crate. Parsing and
//! input-related variants (`MalformedNotation`, `InvalidCoordinates`) are
//! recoverable and suitable for presenting to end users. Game-flow variants
//! (`IllegalMove`, `IllegalState`) are ordinary result values the caller is
//! expected to branch on. `InconsistentPosition` is raised once, when an
//! external position is ingested, never mid-game. `KingMissing` marks a
//! precondition violation inside check analysis and cannot occur through
//! legal play.

use thiserror::Error;

use crate::board::piece::Color;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// Square file/rank indices outside the board.
    #[error("coordinates out of range: file index {file}, rank index {rank}")]
    InvalidCoordinates { file: i16, rank: i16 },

    /// Move or FEN text that could not be parsed.
    #[error("malformed notation or format: {0}")]
    MalformedNotation(String),

    /// A move that is not a member of the current legal-move set.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// An operation invalid for the game's current state.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// An externally supplied position that violates basic chess invariants.
    #[error("inconsistent position: {0}")]
    InconsistentPosition(String),

    /// No king of the given color on the board.
    #[error("no {0:?} king on the board")]
    KingMissing(Color),
}

pub type ChessResult<T> = Result<T, ChessError>;
