//! Threat and check analysis.
//!
//! Threat testing is deliberately unfiltered: it asks whether any capturing
//! movement pattern of the attacking color lands on a square, ignoring king
//! safety and ignoring castling. Keeping this tier separate from the legality
//! filter avoids mutual recursion between check detection and move legality.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::Position;
use crate::board::square::Square;
use crate::errors::ChessResult;
use crate::rules::moves_king::KING_OFFSETS;
use crate::rules::moves_knight::KNIGHT_OFFSETS;
use crate::rules::moves_pawn::pawn_attack_squares;
use crate::rules::moves_sliding::{ray_squares, BISHOP_DIRECTIONS, ROOK_DIRECTIONS};

/// Squares a piece attacks from `from`, regardless of what occupies them.
/// Pawn forward moves and castling are not attacks and are excluded.
pub fn attack_squares(position: &Position, from: Square, piece: Piece, out: &mut Vec<Square>) {
    match piece.kind {
        PieceKind::Pawn => pawn_attack_squares(piece.color, from, out),
        PieceKind::Knight => fixed_offset_squares(from, &KNIGHT_OFFSETS, out),
        PieceKind::King => fixed_offset_squares(from, &KING_OFFSETS, out),
        PieceKind::Bishop => ray_squares(position, from, &BISHOP_DIRECTIONS, out),
        PieceKind::Rook => ray_squares(position, from, &ROOK_DIRECTIONS, out),
        PieceKind::Queen => {
            ray_squares(position, from, &BISHOP_DIRECTIONS, out);
            ray_squares(position, from, &ROOK_DIRECTIONS, out);
        }
    }
}

/// Whether any piece of `attacker` attacks `target`.
pub fn is_square_threatened_by(position: &Position, target: Square, attacker: Color) -> bool {
    let mut attacks = Vec::with_capacity(16);
    for (from, piece) in position.pieces_of(attacker) {
        attacks.clear();
        attack_squares(position, from, piece, &mut attacks);
        if attacks.contains(&target) {
            return true;
        }
    }
    false
}

/// Whether `color`'s king is attacked. A missing king is a precondition
/// violation surfaced as `KingMissing`.
pub fn is_in_check(position: &Position, color: Color) -> ChessResult<bool> {
    let king = position.king_square(color)?;
    Ok(is_square_threatened_by(position, king, color.opposite()))
}

fn fixed_offset_squares(from: Square, offsets: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(d_file, d_rank) in offsets {
        if let Some(square) = from.offset(d_file, d_rank) {
            out.push(square);
        }
    }
}
