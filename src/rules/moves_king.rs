//! Pseudo-legal king moves, including castling.
//!
//! Castling is offered per rights bit only when the king stands on its home
//! square, is not currently in check, the squares between king and rook are
//! empty, and no square the king transits (including its final square) is
//! threatened by the opponent. The move itself is a plain two-file king move;
//! rook relocation is a board-level effect of `Position::after_move`.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::rules::attacks::is_square_threatened_by;
use crate::rules::castling::{
    CastlingRights, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub fn generate_king_moves(
    position: &Position,
    color: Color,
    from: Square,
    castling_rights: CastlingRights,
    out: &mut Vec<PieceMove>,
) {
    let king = Piece::new(PieceKind::King, color);
    for &(d_file, d_rank) in &KING_OFFSETS {
        let Some(to) = from.offset(d_file, d_rank) else {
            continue;
        };
        match position.piece_at(to) {
            None => out.push(PieceMove::new(king, from, to)),
            Some(occupant) if occupant.color != color => {
                out.push(PieceMove::new(king, from, to));
            }
            Some(_) => {}
        }
    }

    generate_castling_moves(position, color, from, castling_rights, out);
}

fn generate_castling_moves(
    position: &Position,
    color: Color,
    from: Square,
    castling_rights: CastlingRights,
    out: &mut Vec<PieceMove>,
) {
    let (home_rank, kingside_bit, queenside_bit) = match color {
        Color::White => (0u8, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (7u8, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };

    if from != Square::at(4, home_rank) {
        return;
    }

    let opponent = color.opposite();

    // Cannot castle out of check.
    if is_square_threatened_by(position, from, opponent) {
        return;
    }

    let king = Piece::new(PieceKind::King, color);

    if castling_rights & kingside_bit != 0 {
        let empty = [Square::at(5, home_rank), Square::at(6, home_rank)];
        let safe = [Square::at(5, home_rank), Square::at(6, home_rank)];
        if empty.iter().all(|sq| position.piece_at(*sq).is_none())
            && safe
                .iter()
                .all(|sq| !is_square_threatened_by(position, *sq, opponent))
        {
            out.push(PieceMove::new(king, from, Square::at(6, home_rank)));
        }
    }

    if castling_rights & queenside_bit != 0 {
        let empty = [
            Square::at(1, home_rank),
            Square::at(2, home_rank),
            Square::at(3, home_rank),
        ];
        let safe = [Square::at(3, home_rank), Square::at(2, home_rank)];
        if empty.iter().all(|sq| position.piece_at(*sq).is_none())
            && safe
                .iter()
                .all(|sq| !is_square_threatened_by(position, *sq, opponent))
        {
            out.push(PieceMove::new(king, from, Square::at(2, home_rank)));
        }
    }
}
