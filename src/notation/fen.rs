//! Forsyth-Edwards Notation parsing and generation.
//!
//! A full FEN record carries six space-separated fields: piece placement,
//! active color, castling availability, en passant target, halfmove clock,
//! and fullmove number. Repetition detection keys on the first four fields
//! only, so positions differing solely in their clocks compare equal.

use crate::board::piece::{Color, Piece};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::errors::{ChessError, ChessResult};
use crate::game::stage::{en_passant_target, Stage};
use crate::notation::algebraic::square_from_algebraic;
use crate::rules::castling::{
    rights_after_move, CastlingRights, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_NONE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};

pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a six-field FEN record into a stage. The stage carries no last
/// move; structural validation beyond field syntax is the caller's concern.
pub fn parse_fen(text: &str) -> ChessResult<Stage> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(ChessError::MalformedNotation(format!(
            "expected 6 FEN fields, got {}: {text}",
            fields.len()
        )));
    }

    let position = parse_placement(fields[0])?;
    let active_color = match fields[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => {
            return Err(ChessError::MalformedNotation(format!(
                "invalid active color: {other}"
            )))
        }
    };
    let castling_rights = parse_castling(fields[2])?;
    let en_passant_target = match fields[3] {
        "-" => None,
        square => {
            let target = square_from_algebraic(square)?;
            // Only the square behind a double pawn advance can be a target.
            if target.rank_index() != 2 && target.rank_index() != 5 {
                return Err(ChessError::MalformedNotation(format!(
                    "en passant target on an impossible rank: {square}"
                )));
            }
            Some(target)
        }
    };
    let halfmove_clock: u16 = fields[4].parse().map_err(|_| {
        ChessError::MalformedNotation(format!("invalid halfmove clock: {}", fields[4]))
    })?;
    let fullmove_number: u16 = fields[5].parse().map_err(|_| {
        ChessError::MalformedNotation(format!("invalid fullmove number: {}", fields[5]))
    })?;
    if fullmove_number == 0 {
        return Err(ChessError::MalformedNotation(
            "fullmove number starts at 1".to_owned(),
        ));
    }

    Ok(Stage {
        position,
        active_color,
        castling_rights,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
        last_move: None,
    })
}

fn parse_placement(field: &str) -> ChessResult<Position> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::MalformedNotation(format!(
            "expected 8 ranks in placement: {field}"
        )));
    }

    let mut position = Position::empty();
    for (row, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file: u8 = 0;
        for ch in rank_text.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if skip == 0 || skip > 8 {
                    return Err(ChessError::MalformedNotation(format!(
                        "invalid empty-square run in rank: {rank_text}"
                    )));
                }
                file += skip as u8;
            } else {
                let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                    ChessError::MalformedNotation(format!("invalid piece character: {ch}"))
                })?;
                if file >= 8 {
                    return Err(ChessError::MalformedNotation(format!(
                        "rank overflows 8 files: {rank_text}"
                    )));
                }
                position.place(Square::at(file, rank), piece);
                file += 1;
            }
        }
        if file != 8 {
            return Err(ChessError::MalformedNotation(format!(
                "rank does not cover 8 files: {rank_text}"
            )));
        }
    }

    Ok(position)
}

fn parse_castling(field: &str) -> ChessResult<CastlingRights> {
    if field == "-" {
        return Ok(CASTLE_NONE);
    }
    let mut rights = CASTLE_NONE;
    for ch in field.chars() {
        let bit = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => {
                return Err(ChessError::MalformedNotation(format!(
                    "invalid castling field: {field}"
                )))
            }
        };
        rights |= bit;
    }
    Ok(rights)
}

/// Render the full six-field FEN record for a stage.
pub fn generate_fen(stage: &Stage) -> String {
    format!(
        "{} {} {}",
        reduced_fen(stage),
        stage.halfmove_clock,
        stage.fullmove_number
    )
}

/// The first four FEN fields only. This is the repetition key: two stages
/// repeat when their placement, active color, castling rights, and en
/// passant target all match, regardless of the clocks.
pub fn reduced_fen(stage: &Stage) -> String {
    format!(
        "{} {} {} {}",
        placement_field(&stage.position),
        match stage.active_color {
            Color::White => 'w',
            Color::Black => 'b',
        },
        castling_field(stage.castling_rights),
        match stage.en_passant_target {
            Some(square) => square.to_string(),
            None => "-".to_owned(),
        }
    )
}

/// The repetition key of the stage a move would produce, computed without
/// building the full successor stage.
pub fn reduced_fen_after(stage: &Stage, piece_move: &PieceMove) -> String {
    format!(
        "{} {} {} {}",
        placement_field(&stage.position.after_move(piece_move)),
        match stage.active_color.opposite() {
            Color::White => 'w',
            Color::Black => 'b',
        },
        castling_field(rights_after_move(stage.castling_rights, piece_move)),
        match en_passant_target(piece_move) {
            Some(square) => square.to_string(),
            None => "-".to_owned(),
        }
    )
}

fn placement_field(position: &Position) -> String {
    let mut out = String::new();
    for rank in (0..8).rev() {
        if rank != 7 {
            out.push('/');
        }
        let mut empty = 0;
        for file in 0..8 {
            match position.piece_at(Square::at(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from_digit(empty, 10).unwrap_or('0'));
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from_digit(empty, 10).unwrap_or('0'));
        }
    }
    out
}

fn castling_field(rights: CastlingRights) -> String {
    if rights == CASTLE_NONE {
        return "-".to_owned();
    }
    let mut out = String::new();
    for (bit, letter) in [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ] {
        if rights & bit != 0 {
            out.push(letter);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{
        generate_fen, parse_fen, reduced_fen, reduced_fen_after, STARTING_POSITION_FEN,
    };
    use crate::board::piece::Color;
    use crate::errors::ChessError;
    use crate::game::stage::Stage;
    use crate::notation::algebraic::{parse_coordinate_move, square_from_algebraic};
    use crate::rules::castling::CASTLE_ALL;

    #[test]
    fn starting_position_round_trips() {
        let stage = parse_fen(STARTING_POSITION_FEN).expect("FEN parses");
        assert_eq!(stage.active_color, Color::White);
        assert_eq!(stage.castling_rights, CASTLE_ALL);
        assert_eq!(stage.en_passant_target, None);
        assert_eq!(stage.halfmove_clock, 0);
        assert_eq!(stage.fullmove_number, 1);
        assert_eq!(generate_fen(&stage), STARTING_POSITION_FEN);
        assert_eq!(generate_fen(&Stage::initial()), STARTING_POSITION_FEN);
    }

    #[test]
    fn arbitrary_records_round_trip() {
        let samples = [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 12",
            "8/P3k3/8/8/8/8/8/4K3 w - - 42 99",
        ];
        for sample in samples {
            let stage = parse_fen(sample).expect("FEN parses");
            assert_eq!(generate_fen(&stage), sample);
        }
    }

    #[test]
    fn malformed_records_are_rejected() {
        for bad in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPX/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - z 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e5 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq a1 0 1",
        ] {
            assert!(
                matches!(parse_fen(bad), Err(ChessError::MalformedNotation(_))),
                "should reject: {bad}"
            );
        }
    }

    #[test]
    fn reduced_key_drops_the_clocks() {
        let slow = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 40 70").expect("FEN parses");
        let fresh = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN parses");
        assert_eq!(reduced_fen(&slow), reduced_fen(&fresh));
        assert_eq!(reduced_fen(&slow), "4k3/8/8/8/8/8/8/4K3 w - -");
    }

    #[test]
    fn reduced_key_after_a_move_matches_playing_it() {
        let stage = Stage::initial();
        for text in ["e2e4", "g1f3", "b2b4"] {
            let piece_move = parse_coordinate_move(&stage, text).expect("move parses");
            let (next, _) = stage.play(&piece_move, false).expect("move plays");
            assert_eq!(reduced_fen_after(&stage, &piece_move), reduced_fen(&next));
        }
    }

    #[test]
    fn double_pawn_advance_records_its_en_passant_target() {
        let stage = Stage::initial();
        let push = parse_coordinate_move(&stage, "e2e4").expect("move parses");
        let key = reduced_fen_after(&stage, &push);
        assert!(key.ends_with(" b KQkq e3"), "unexpected key: {key}");
        assert_eq!(
            square_from_algebraic("e3").expect("square parses"),
            crate::game::stage::en_passant_target(&push).expect("target present")
        );
    }
}
