//! Square and coordinate-move text conversions.
//!
//! Converts between human-readable coordinates ("e4", "e2e4", "e7e8q") and
//! the engine's value types. Coordinate moves are resolved against a stage so
//! the moving piece comes from the board.

use crate::board::piece::PieceKind;
use crate::board::piece_move::PieceMove;
use crate::board::square::Square;
use crate::errors::{ChessError, ChessResult};
use crate::game::stage::Stage;

/// Parse a square name such as "e4".
pub fn square_from_algebraic(text: &str) -> ChessResult<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::MalformedNotation(format!(
            "invalid square: {text}"
        )));
    }

    let file = i16::from(bytes[0]) - i16::from(b'a');
    let rank = i16::from(bytes[1]) - i16::from(b'1');
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return Err(ChessError::InvalidCoordinates { file, rank });
    }

    Square::from_indices(file as u8, rank as u8)
}

/// Render a square name such as "e4".
pub fn square_to_algebraic(square: Square) -> String {
    square.to_string()
}

/// Parse a coordinate move ("e2e4", "a7a8q") against a stage. The piece is
/// taken from the stage's board; legality is the caller's concern.
pub fn parse_coordinate_move(stage: &Stage, text: &str) -> ChessResult<PieceMove> {
    // Byte-index slicing below requires ASCII.
    let len = text.len();
    if !text.is_ascii() || (len != 4 && len != 5) {
        return Err(ChessError::MalformedNotation(format!(
            "invalid coordinate move: {text}"
        )));
    }

    let from = square_from_algebraic(&text[0..2])?;
    let to = square_from_algebraic(&text[2..4])?;

    let piece = stage
        .position
        .piece_at(from)
        .filter(|piece| piece.color == stage.active_color)
        .ok_or_else(|| ChessError::IllegalMove(text.to_owned()))?;

    let promotion = if len == 5 {
        if piece.kind != PieceKind::Pawn {
            return Err(ChessError::MalformedNotation(format!(
                "promotion suffix on a non-pawn move: {text}"
            )));
        }
        Some(promotion_kind(text.as_bytes()[4] as char, text)?)
    } else {
        None
    };

    Ok(PieceMove {
        piece,
        from,
        to,
        promotion,
    })
}

fn promotion_kind(ch: char, text: &str) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'r' => Ok(PieceKind::Rook),
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::MalformedNotation(format!(
            "invalid promotion piece in: {text}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_coordinate_move, square_from_algebraic};
    use crate::board::piece::{Color, PieceKind};
    use crate::errors::ChessError;
    use crate::game::stage::Stage;
    use crate::notation::fen::parse_fen;

    #[test]
    fn square_names_round_trip() {
        for name in ["a1", "h8", "e4", "c7"] {
            let square = square_from_algebraic(name).expect("square parses");
            assert_eq!(square.to_string(), name);
        }
    }

    #[test]
    fn bad_square_text_reports_the_right_error() {
        assert!(matches!(
            square_from_algebraic("e44"),
            Err(ChessError::MalformedNotation(_))
        ));
        assert_eq!(
            square_from_algebraic("j4"),
            Err(ChessError::InvalidCoordinates { file: 9, rank: 3 })
        );
        assert!(matches!(
            square_from_algebraic("a9"),
            Err(ChessError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn coordinate_moves_resolve_the_moving_piece() {
        let stage = Stage::initial();
        let push = parse_coordinate_move(&stage, "e2e4").expect("move parses");
        assert_eq!(push.piece.kind, PieceKind::Pawn);
        assert_eq!(push.piece.color, Color::White);
        assert_eq!(push.promotion, None);
        assert_eq!(push.to_string(), "e2e4");
    }

    #[test]
    fn promotion_suffix_parses_for_pawns_only() {
        let stage = parse_fen("8/P3k3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN parses");
        let promo = parse_coordinate_move(&stage, "a7a8q").expect("move parses");
        assert_eq!(promo.promotion, Some(PieceKind::Queen));

        let king_stage = Stage::initial();
        assert!(matches!(
            parse_coordinate_move(&king_stage, "e1e2q"),
            Err(ChessError::MalformedNotation(_))
        ));
    }

    #[test]
    fn non_ascii_move_text_is_rejected() {
        let stage = Stage::initial();
        // "e\u{e9}4e" is five bytes with a char boundary inside the slice
        // points; it must come back as a typed error.
        assert!(matches!(
            parse_coordinate_move(&stage, "e\u{e9}4e"),
            Err(ChessError::MalformedNotation(_))
        ));
        assert!(matches!(
            parse_coordinate_move(&stage, "\u{00e9}2e4"),
            Err(ChessError::MalformedNotation(_))
        ));
    }

    #[test]
    fn moving_an_absent_or_enemy_piece_is_illegal() {
        let stage = Stage::initial();
        assert!(matches!(
            parse_coordinate_move(&stage, "e4e5"),
            Err(ChessError::IllegalMove(_))
        ));
        assert!(matches!(
            parse_coordinate_move(&stage, "e7e5"),
            Err(ChessError::IllegalMove(_))
        ));
    }
}
