//! Standard algebraic notation generation.
//!
//! Renders a move given the pre-move board and the mover's legal-move set
//! (needed for disambiguation). Castling renders as `O-O`/`O-O-O` and is
//! never disambiguated. A draw offered with the move appends `" (=)"`.

use std::collections::BTreeSet;

use crate::board::piece::PieceKind;
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::game::stage::CheckKind;

pub fn to_notation(
    position: &Position,
    legal: &BTreeSet<PieceMove>,
    piece_move: &PieceMove,
    draw_offered: bool,
    check: CheckKind,
) -> String {
    let mut out = String::new();

    if piece_move.is_castling() {
        if piece_move.to.file_index() > piece_move.from.file_index() {
            out.push_str("O-O");
        } else {
            out.push_str("O-O-O");
        }
    } else {
        if let Some(letter) = piece_move.piece.kind.letter() {
            out.push(letter);
        }

        // Another legal move of the same piece kind to the same destination
        // forces a disambiguator: a shared source rank appends the file, a
        // shared source file appends the rank; both may apply.
        let mut shares_rank = false;
        let mut shares_file = false;
        for other in legal {
            if other.piece == piece_move.piece
                && other.to == piece_move.to
                && other.from != piece_move.from
            {
                if other.from.rank_index() == piece_move.from.rank_index() {
                    shares_rank = true;
                }
                if other.from.file_index() == piece_move.from.file_index() {
                    shares_file = true;
                }
            }
        }
        if shares_rank {
            out.push(piece_move.from.file_char());
        }
        if shares_file {
            out.push(piece_move.from.rank_char());
        }

        let captures = match position.piece_at(piece_move.to) {
            Some(occupant) => occupant.color != piece_move.piece.color,
            // A pawn changing file onto an empty square captures en passant.
            None => {
                piece_move.piece.kind == PieceKind::Pawn
                    && piece_move.from.file_index() != piece_move.to.file_index()
            }
        };
        if captures {
            out.push('x');
        }

        out.push_str(&piece_move.to.to_string());

        if let Some(promotion) = piece_move.promotion {
            out.push('=');
            if let Some(letter) = promotion.letter() {
                out.push(letter);
            }
        }
    }

    match check {
        CheckKind::Check => out.push('+'),
        CheckKind::Checkmate => out.push('#'),
        CheckKind::None => {}
    }

    if draw_offered {
        out.push_str(" (=)");
    }

    out
}
