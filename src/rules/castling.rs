//! Castling rights bitmask and its update rule.
//!
//! Rights only ever clear over a game's history, never set. A color's both
//! bits clear when its king moves; a single side's bit clears when any move's
//! source or destination equals that rook's starting square, which also
//! revokes the right when the rook is captured at home.

use crate::board::piece::{Color, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::square::Square;

pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;

pub const CASTLE_NONE: CastlingRights = 0;
pub const CASTLE_ALL: CastlingRights = CASTLE_WHITE_KINGSIDE
    | CASTLE_WHITE_QUEENSIDE
    | CASTLE_BLACK_KINGSIDE
    | CASTLE_BLACK_QUEENSIDE;

/// Rook starting square guarding each right.
pub const ROOK_HOME_SQUARES: [(Square, CastlingRights); 4] = [
    (Square::at(7, 0), CASTLE_WHITE_KINGSIDE),
    (Square::at(0, 0), CASTLE_WHITE_QUEENSIDE),
    (Square::at(7, 7), CASTLE_BLACK_KINGSIDE),
    (Square::at(0, 7), CASTLE_BLACK_QUEENSIDE),
];

pub fn rights_after_move(rights: CastlingRights, piece_move: &PieceMove) -> CastlingRights {
    let mut rights = rights;

    if piece_move.piece.kind == PieceKind::King {
        rights &= match piece_move.piece.color {
            Color::White => !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE),
            Color::Black => !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE),
        };
    }

    for (home, bit) in ROOK_HOME_SQUARES {
        if piece_move.from == home || piece_move.to == home {
            rights &= !bit;
        }
    }

    rights
}

#[cfg(test)]
mod tests {
    use super::{
        rights_after_move, CASTLE_ALL, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
        CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
    };
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::piece_move::PieceMove;
    use crate::board::square::Square;

    #[test]
    fn king_move_clears_both_bits_of_its_color() {
        let king_step = PieceMove::new(
            Piece::new(PieceKind::King, Color::White),
            Square::at(4, 0),
            Square::at(4, 1),
        );
        let rights = rights_after_move(CASTLE_ALL, &king_step);
        assert_eq!(rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn rook_leaving_home_clears_only_its_side() {
        let rook_lift = PieceMove::new(
            Piece::new(PieceKind::Rook, Color::White),
            Square::at(0, 0),
            Square::at(0, 4),
        );
        let rights = rights_after_move(CASTLE_ALL, &rook_lift);
        assert_eq!(rights, CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE);
    }

    #[test]
    fn capture_on_a_rook_home_square_revokes_that_right() {
        let capture = PieceMove::new(
            Piece::new(PieceKind::Queen, Color::White),
            Square::at(7, 3),
            Square::at(7, 7), // lands on h8
        );
        let rights = rights_after_move(CASTLE_ALL, &capture);
        assert_eq!(rights, CASTLE_ALL & !CASTLE_BLACK_KINGSIDE);
    }

    #[test]
    fn unrelated_moves_leave_rights_untouched() {
        let knight_hop = PieceMove::new(
            Piece::new(PieceKind::Knight, Color::White),
            Square::at(6, 0),
            Square::at(5, 2),
        );
        assert_eq!(rights_after_move(CASTLE_ALL, &knight_hop), CASTLE_ALL);
        assert_eq!(
            rights_after_move(CASTLE_WHITE_KINGSIDE, &knight_hop),
            CASTLE_WHITE_KINGSIDE
        );
    }
}
