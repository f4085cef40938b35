//! Pseudo-legal moves for the sliding pieces (bishop, rook, queen).
//!
//! Each ray is walked one step at a time: empty squares are included and the
//! walk continues, an enemy-occupied square is included and the walk stops,
//! an own-colored or off-board square stops the walk immediately.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub fn generate_bishop_moves(
    position: &Position,
    color: Color,
    from: Square,
    out: &mut Vec<PieceMove>,
) {
    generate_sliding_moves(
        position,
        Piece::new(PieceKind::Bishop, color),
        from,
        &BISHOP_DIRECTIONS,
        out,
    );
}

pub fn generate_rook_moves(
    position: &Position,
    color: Color,
    from: Square,
    out: &mut Vec<PieceMove>,
) {
    generate_sliding_moves(
        position,
        Piece::new(PieceKind::Rook, color),
        from,
        &ROOK_DIRECTIONS,
        out,
    );
}

pub fn generate_queen_moves(
    position: &Position,
    color: Color,
    from: Square,
    out: &mut Vec<PieceMove>,
) {
    let queen = Piece::new(PieceKind::Queen, color);
    generate_sliding_moves(position, queen, from, &BISHOP_DIRECTIONS, out);
    generate_sliding_moves(position, queen, from, &ROOK_DIRECTIONS, out);
}

fn generate_sliding_moves(
    position: &Position,
    piece: Piece,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<PieceMove>,
) {
    for &(d_file, d_rank) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_file, d_rank) {
            match position.piece_at(next) {
                None => out.push(PieceMove::new(piece, from, next)),
                Some(occupant) if occupant.color != piece.color => {
                    out.push(PieceMove::new(piece, from, next));
                    break;
                }
                Some(_) => break,
            }
            current = next;
        }
    }
}

/// Squares reachable along the given rays, including the first occupied
/// square of either color. Used by threat analysis.
pub fn ray_squares(
    position: &Position,
    from: Square,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_file, d_rank) {
            out.push(next);
            if position.piece_at(next).is_some() {
                break;
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_bishop_moves, generate_queen_moves, generate_rook_moves};
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::position::Position;
    use crate::board::square::Square;

    #[test]
    fn rook_on_empty_board_reaches_fourteen_squares() {
        let mut position = Position::empty();
        position.place(Square::at(3, 3), Piece::new(PieceKind::Rook, Color::White));

        let mut out = Vec::new();
        generate_rook_moves(&position, Color::White, Square::at(3, 3), &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn ray_stops_before_own_piece_and_on_enemy_piece() {
        let mut position = Position::empty();
        position.place(Square::at(0, 0), Piece::new(PieceKind::Rook, Color::White));
        position.place(Square::at(0, 2), Piece::new(PieceKind::Pawn, Color::White)); // a3, own
        position.place(Square::at(3, 0), Piece::new(PieceKind::Pawn, Color::Black)); // d1, enemy

        let mut out = Vec::new();
        generate_rook_moves(&position, Color::White, Square::at(0, 0), &mut out);

        let destinations: Vec<String> = out.iter().map(|mv| mv.to.to_string()).collect();
        assert!(destinations.contains(&"a2".to_owned()));
        assert!(!destinations.contains(&"a3".to_owned()));
        assert!(destinations.contains(&"d1".to_owned()));
        assert!(!destinations.contains(&"e1".to_owned()));
        assert_eq!(out.len(), 4); // a2, b1, c1, d1
    }

    #[test]
    fn queen_combines_bishop_and_rook_rays() {
        let mut position = Position::empty();
        position.place(Square::at(3, 3), Piece::new(PieceKind::Queen, Color::White));

        let mut queen_moves = Vec::new();
        generate_queen_moves(&position, Color::White, Square::at(3, 3), &mut queen_moves);

        let mut position_bishop = Position::empty();
        position_bishop.place(Square::at(3, 3), Piece::new(PieceKind::Bishop, Color::White));
        let mut bishop_moves = Vec::new();
        generate_bishop_moves(
            &position_bishop,
            Color::White,
            Square::at(3, 3),
            &mut bishop_moves,
        );

        assert_eq!(queen_moves.len(), 14 + bishop_moves.len());
    }
}
