//! Abstract piece movement.
//!
//! A `PieceMove` is the caller-facing movement description: which piece moves
//! from where to where, plus an optional promotion kind. Castling is a king
//! move of two files; en passant is a diagonal pawn move onto an empty
//! square. The board-level side effects of both are handled by
//! `Position::after_move`.

use std::fmt;

use crate::board::piece::{Piece, PieceKind};
use crate::board::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl PieceMove {
    #[inline]
    pub const fn new(piece: Piece, from: Square, to: Square) -> Self {
        Self {
            piece,
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn promoting(piece: Piece, from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            piece,
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// A king moving two files is a castling move.
    #[inline]
    pub fn is_castling(&self) -> bool {
        self.piece.kind == PieceKind::King
            && self.from.file_index().abs_diff(self.to.file_index()) == 2
    }

    /// Coordinate text ("e2e4", "e7e8q") used in error payloads and logs.
    pub fn coordinate_text(&self) -> String {
        let mut out = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            out.push(kind.fen_char());
        }
        out
    }
}

impl fmt::Display for PieceMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate_text())
    }
}
