//! Draw-condition evaluation.
//!
//! `reason_to_draw` classifies a stage against the full draw table in a fixed
//! priority order; several conditions can co-occur and the first match wins.
//! The first four reasons are mandatory (the game ends automatically), the
//! remaining three are claimable (the game stays in play and the reason is
//! surfaced for an explicit claim).

use std::collections::HashMap;
use std::collections::BTreeSet;

use crate::board::piece::{Color, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::game::stage::Stage;
use crate::notation::fen::{reduced_fen, reduced_fen_after};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    SeventyFiveMoveRule,
    FivefoldRepetition,
    Stalemate,
    InsufficientMaterial,
    Agreement,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl DrawReason {
    /// Mandatory reasons end the game automatically; claimable reasons only
    /// make an explicit draw claim valid.
    pub const fn is_mandatory(self) -> bool {
        matches!(
            self,
            DrawReason::SeventyFiveMoveRule
                | DrawReason::FivefoldRepetition
                | DrawReason::Stalemate
                | DrawReason::InsufficientMaterial
        )
    }
}

/// Evaluate the draw table for a stage. `prior_counts` maps reduced position
/// keys to their number of occurrences strictly before this stage;
/// `draw_offered` states whether the move that produced this stage carried a
/// draw offer.
pub fn reason_to_draw(
    stage: &Stage,
    legal: &BTreeSet<PieceMove>,
    in_check: bool,
    prior_counts: &HashMap<String, u32>,
    draw_offered: bool,
) -> Option<DrawReason> {
    let key = reduced_fen(stage);
    let occurrences = prior_counts.get(&key).copied().unwrap_or(0);

    if stage.halfmove_clock >= 150 {
        return Some(DrawReason::SeventyFiveMoveRule);
    }
    if occurrences >= 4 {
        return Some(DrawReason::FivefoldRepetition);
    }
    if legal.is_empty() && !in_check {
        return Some(DrawReason::Stalemate);
    }
    if insufficient_material(&stage.position) {
        return Some(DrawReason::InsufficientMaterial);
    }
    if draw_offered {
        return Some(DrawReason::Agreement);
    }
    if stage.halfmove_clock >= 100 {
        return Some(DrawReason::FiftyMoveRule);
    }
    if occurrences >= 2 || repetition_within_reach(stage, legal, prior_counts, &key) {
        return Some(DrawReason::ThreefoldRepetition);
    }

    None
}

/// Threefold repetition must be reported one move early: the player to move
/// can already claim when any legal move would produce a third occurrence.
fn repetition_within_reach(
    stage: &Stage,
    legal: &BTreeSet<PieceMove>,
    prior_counts: &HashMap<String, u32>,
    current_key: &str,
) -> bool {
    legal.iter().any(|piece_move| {
        let next_key = reduced_fen_after(stage, piece_move);
        let mut count = prior_counts.get(&next_key).copied().unwrap_or(0);
        if next_key == current_key {
            count += 1;
        }
        count >= 2
    })
}

/// Material-sufficiency classification over the non-king piece sets.
pub fn insufficient_material(position: &Position) -> bool {
    let extras =
        |color: Color| -> Vec<(Square, PieceKind)> {
            position
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind != PieceKind::King)
                .map(|(square, piece)| (square, piece.kind))
                .collect()
        };
    let white = extras(Color::White);
    let black = extras(Color::Black);

    match (white.as_slice(), black.as_slice()) {
        ([], []) => true,
        ([(white_sq, PieceKind::Bishop)], [(black_sq, PieceKind::Bishop)]) => {
            white_sq.is_dark() == black_sq.is_dark()
        }
        ([(_, kind)], []) | ([], [(_, kind)]) => {
            matches!(*kind, PieceKind::Knight | PieceKind::Bishop)
        }
        _ => false,
    }
}
