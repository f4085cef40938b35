//! Immutable piece placement.
//!
//! `Position` maps occupied squares to pieces; unoccupied squares are simply
//! absent. Applying a move produces a new `Position`, leaving the original
//! untouched. The map's key order gives deterministic iteration in display
//! order (rank 8 down to rank 1, files a to h).

use std::collections::BTreeMap;
use std::fmt;

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::square::Square;
use crate::errors::{ChessError, ChessResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    squares: BTreeMap<Square, Piece>,
}

const BACK_RANK_KINDS: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard starting placement.
    pub fn initial() -> Self {
        let mut position = Position::empty();
        for (file, kind) in BACK_RANK_KINDS.into_iter().enumerate() {
            let file = file as u8;
            position.place(Square::at(file, 0), Piece::new(kind, Color::White));
            position.place(Square::at(file, 1), Piece::new(PieceKind::Pawn, Color::White));
            position.place(Square::at(file, 6), Piece::new(PieceKind::Pawn, Color::Black));
            position.place(Square::at(file, 7), Piece::new(kind, Color::Black));
        }
        position
    }

    /// Put a piece on a square, replacing any occupant.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares.insert(square, piece);
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(&square).copied()
    }

    /// All occupied squares in display order.
    pub fn occupied_squares(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().map(|(square, piece)| (*square, *piece))
    }

    /// Occupied squares belonging to one color, in display order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied_squares()
            .filter(move |(_, piece)| piece.color == color)
    }

    /// Locate the king of a color; its absence is a precondition violation.
    pub fn king_square(&self, color: Color) -> ChessResult<Square> {
        self.occupied_squares()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
            .ok_or(ChessError::KingMissing(color))
    }

    /// Apply the move's board effect only: no legality checking, no context
    /// update. Handles the compound effects of castling (rook relocation)
    /// and en passant (removal of the bypassed pawn). Total over well-formed
    /// moves whose source square is occupied.
    pub fn after_move(&self, piece_move: &PieceMove) -> Position {
        let mut squares = self.squares.clone();
        squares.remove(&piece_move.from);

        // En passant: a diagonal pawn move onto an empty destination also
        // removes the pawn on the destination's file and the source's rank.
        if piece_move.piece.kind == PieceKind::Pawn
            && piece_move.from.file_index() != piece_move.to.file_index()
            && !squares.contains_key(&piece_move.to)
        {
            squares.remove(&Square::at(
                piece_move.to.file_index(),
                piece_move.from.rank_index(),
            ));
        }

        if piece_move.is_castling() {
            let rank = piece_move.from.rank_index();
            let (rook_from, rook_to) = if piece_move.to.file_index() > piece_move.from.file_index()
            {
                (Square::at(7, rank), Square::at(5, rank))
            } else {
                (Square::at(0, rank), Square::at(3, rank))
            };
            if let Some(rook) = squares.remove(&rook_from) {
                squares.insert(rook_to, rook);
            }
        }

        let placed = match piece_move.promotion {
            Some(kind) => Piece::new(kind, piece_move.piece.color),
            None => piece_move.piece,
        };
        squares.insert(piece_move.to, placed);

        Position { squares }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let glyph = self
                    .piece_at(Square::at(file, rank))
                    .map_or('.', Piece::fen_char);
                write!(f, "{glyph} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::piece_move::PieceMove;
    use crate::board::square::Square;
    use crate::errors::ChessError;

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn initial_position_has_thirty_two_pieces() {
        let position = Position::initial();
        assert_eq!(position.occupied_squares().count(), 32);
        assert_eq!(
            position.piece_at(Square::at(4, 0)),
            Some(white(PieceKind::King))
        );
        assert_eq!(
            position.piece_at(Square::at(3, 7)),
            Some(black(PieceKind::Queen))
        );
        assert_eq!(position.piece_at(Square::at(4, 3)), None);
    }

    #[test]
    fn after_move_relocates_exactly_one_piece() {
        let position = Position::initial();
        let push = PieceMove::new(white(PieceKind::Pawn), Square::at(4, 1), Square::at(4, 3));
        let next = position.after_move(&push);

        assert_eq!(next.occupied_squares().count(), 32);
        assert_eq!(next.piece_at(Square::at(4, 1)), None);
        assert_eq!(next.piece_at(Square::at(4, 3)), Some(white(PieceKind::Pawn)));
        // The original is untouched.
        assert_eq!(
            position.piece_at(Square::at(4, 1)),
            Some(white(PieceKind::Pawn))
        );
    }

    #[test]
    fn after_move_en_passant_removes_the_bypassed_pawn() {
        let mut position = Position::empty();
        position.place(Square::at(4, 4), white(PieceKind::Pawn)); // e5
        position.place(Square::at(3, 4), black(PieceKind::Pawn)); // d5

        let capture = PieceMove::new(white(PieceKind::Pawn), Square::at(4, 4), Square::at(3, 5));
        let next = position.after_move(&capture);

        assert_eq!(next.occupied_squares().count(), 1);
        assert_eq!(next.piece_at(Square::at(3, 5)), Some(white(PieceKind::Pawn)));
        assert_eq!(next.piece_at(Square::at(3, 4)), None);
    }

    #[test]
    fn after_move_castling_relocates_the_rook() {
        let mut position = Position::empty();
        position.place(Square::at(4, 0), white(PieceKind::King));
        position.place(Square::at(7, 0), white(PieceKind::Rook));
        position.place(Square::at(0, 0), white(PieceKind::Rook));

        let kingside =
            PieceMove::new(white(PieceKind::King), Square::at(4, 0), Square::at(6, 0));
        let next = position.after_move(&kingside);
        assert_eq!(next.piece_at(Square::at(6, 0)), Some(white(PieceKind::King)));
        assert_eq!(next.piece_at(Square::at(5, 0)), Some(white(PieceKind::Rook)));
        assert_eq!(next.piece_at(Square::at(7, 0)), None);

        let queenside =
            PieceMove::new(white(PieceKind::King), Square::at(4, 0), Square::at(2, 0));
        let next = position.after_move(&queenside);
        assert_eq!(next.piece_at(Square::at(2, 0)), Some(white(PieceKind::King)));
        assert_eq!(next.piece_at(Square::at(3, 0)), Some(white(PieceKind::Rook)));
        assert_eq!(next.piece_at(Square::at(0, 0)), None);
    }

    #[test]
    fn after_move_promotion_replaces_the_pawn() {
        let mut position = Position::empty();
        position.place(Square::at(0, 6), white(PieceKind::Pawn));

        let promo = PieceMove::promoting(
            white(PieceKind::Pawn),
            Square::at(0, 6),
            Square::at(0, 7),
            PieceKind::Queen,
        );
        let next = position.after_move(&promo);
        assert_eq!(next.piece_at(Square::at(0, 7)), Some(white(PieceKind::Queen)));
        assert_eq!(next.occupied_squares().count(), 1);
    }

    #[test]
    fn king_square_reports_missing_kings() {
        let position = Position::empty();
        assert_eq!(
            position.king_square(Color::White),
            Err(ChessError::KingMissing(Color::White))
        );
        assert!(Position::initial().king_square(Color::Black).is_ok());
    }
}
