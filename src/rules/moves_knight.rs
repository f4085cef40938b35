//! Pseudo-legal knight moves.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub fn generate_knight_moves(
    position: &Position,
    color: Color,
    from: Square,
    out: &mut Vec<PieceMove>,
) {
    let knight = Piece::new(PieceKind::Knight, color);
    for &(d_file, d_rank) in &KNIGHT_OFFSETS {
        let Some(to) = from.offset(d_file, d_rank) else {
            continue;
        };
        match position.piece_at(to) {
            None => out.push(PieceMove::new(knight, from, to)),
            Some(occupant) if occupant.color != color => {
                out.push(PieceMove::new(knight, from, to));
            }
            Some(_) => {}
        }
    }
}
