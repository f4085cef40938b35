//! Full legal move generation pipeline.
//!
//! Orchestrates piece-wise pseudo-legal generation, applies each candidate to
//! a scratch position, and discards moves that leave the mover's own king in
//! check. This is the only place self-check elimination happens; the
//! generators themselves never filter.

use std::collections::BTreeSet;

use crate::board::piece::{Color, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::errors::ChessResult;
use crate::rules::attacks::is_in_check;
use crate::rules::castling::CastlingRights;
use crate::rules::moves_king::generate_king_moves;
use crate::rules::moves_knight::generate_knight_moves;
use crate::rules::moves_pawn::generate_pawn_moves;
use crate::rules::moves_sliding::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};

/// Every movement-pattern move for `color`, ignoring king safety.
pub fn generate_pseudo_legal_moves(
    position: &Position,
    en_passant: Option<Square>,
    castling_rights: CastlingRights,
    color: Color,
) -> Vec<PieceMove> {
    let mut out = Vec::with_capacity(64);
    for (from, piece) in position.pieces_of(color) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, color, from, en_passant, &mut out),
            PieceKind::Knight => generate_knight_moves(position, color, from, &mut out),
            PieceKind::Bishop => generate_bishop_moves(position, color, from, &mut out),
            PieceKind::Rook => generate_rook_moves(position, color, from, &mut out),
            PieceKind::Queen => generate_queen_moves(position, color, from, &mut out),
            PieceKind::King => {
                generate_king_moves(position, color, from, castling_rights, &mut out)
            }
        }
    }
    out
}

/// The legal-move set for `color`: pseudo-legal moves minus those that would
/// leave the mover's own king in check.
pub fn legal_moves(
    position: &Position,
    en_passant: Option<Square>,
    castling_rights: CastlingRights,
    color: Color,
) -> ChessResult<BTreeSet<PieceMove>> {
    let mut legal = BTreeSet::new();
    for candidate in generate_pseudo_legal_moves(position, en_passant, castling_rights, color) {
        let scratch = position.after_move(&candidate);
        if !is_in_check(&scratch, color)? {
            legal.insert(candidate);
        }
    }
    Ok(legal)
}
