//! Pseudo-legal pawn moves.
//!
//! One square forward onto an empty square; two from the starting rank when
//! both intervening squares are empty; diagonal capture onto an
//! enemy-occupied square or the en-passant target. Any move landing on the
//! last rank is emitted once per promotion kind instead of as a single move.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;

pub fn generate_pawn_moves(
    position: &Position,
    color: Color,
    from: Square,
    en_passant: Option<Square>,
    out: &mut Vec<PieceMove>,
) {
    let pawn = Piece::new(PieceKind::Pawn, color);
    let (direction, start_rank) = match color {
        Color::White => (1i8, 1u8),
        Color::Black => (-1i8, 6u8),
    };

    if let Some(one) = from.offset(0, direction) {
        if position.piece_at(one).is_none() {
            push_pawn_move(pawn, from, one, out);

            if from.rank_index() == start_rank {
                if let Some(two) = from.offset(0, 2 * direction) {
                    if position.piece_at(two).is_none() {
                        out.push(PieceMove::new(pawn, from, two));
                    }
                }
            }
        }
    }

    for d_file in [-1i8, 1i8] {
        let Some(to) = from.offset(d_file, direction) else {
            continue;
        };
        let enemy_occupied = position
            .piece_at(to)
            .is_some_and(|occupant| occupant.color != color);
        if enemy_occupied || en_passant == Some(to) {
            push_pawn_move(pawn, from, to, out);
        }
    }
}

/// Attack diagonals of a pawn, regardless of occupancy. Used by threat
/// analysis, where an empty square can still be under pawn attack.
pub fn pawn_attack_squares(color: Color, from: Square, out: &mut Vec<Square>) {
    let direction = match color {
        Color::White => 1i8,
        Color::Black => -1i8,
    };
    for d_file in [-1i8, 1i8] {
        if let Some(square) = from.offset(d_file, direction) {
            out.push(square);
        }
    }
}

fn push_pawn_move(pawn: Piece, from: Square, to: Square, out: &mut Vec<PieceMove>) {
    if to.rank_index() == 7 || to.rank_index() == 0 {
        for kind in PieceKind::PROMOTION_KINDS {
            out.push(PieceMove::promoting(pawn, from, to, kind));
        }
    } else {
        out.push(PieceMove::new(pawn, from, to));
    }
}
