//! Overall game-state classification.
//!
//! Combines check status, the legal-move set, and the draw evaluation into a
//! single assessment. Checkmate takes precedence over any simultaneously-true
//! mandatory draw reason; mandatory draws end the game; claimable reasons are
//! surfaced separately while the game stays in play.

use std::collections::{BTreeSet, HashMap};

use crate::board::piece::Color;
use crate::board::piece_move::PieceMove;
use crate::errors::ChessResult;
use crate::game::draw::{reason_to_draw, DrawReason};
use crate::game::stage::{CheckKind, Stage};
use crate::rules::attacks::is_in_check;
use crate::rules::legal_moves::legal_moves;

/// Overall game state; the draw reason is present exactly when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Drawn(DrawReason),
    WhiteWon,
    BlackWon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateAssessment {
    pub status: GameStatus,
    pub check: CheckKind,
    pub legal_moves: BTreeSet<PieceMove>,
    pub claimable_draw: Option<DrawReason>,
}

pub fn detect(
    stage: &Stage,
    draw_offered: bool,
    prior_counts: &HashMap<String, u32>,
) -> ChessResult<StateAssessment> {
    let in_check = is_in_check(&stage.position, stage.active_color)?;
    let moves = legal_moves(
        &stage.position,
        stage.en_passant_target,
        stage.castling_rights,
        stage.active_color,
    )?;

    if in_check && moves.is_empty() {
        // Checkmate on the move that would otherwise trigger an automatic
        // draw still counts as checkmate.
        let status = match stage.active_color {
            Color::White => GameStatus::BlackWon,
            Color::Black => GameStatus::WhiteWon,
        };
        return Ok(StateAssessment {
            status,
            check: CheckKind::Checkmate,
            legal_moves: moves,
            claimable_draw: None,
        });
    }

    let check = if in_check {
        CheckKind::Check
    } else {
        CheckKind::None
    };

    match reason_to_draw(stage, &moves, in_check, prior_counts, draw_offered) {
        Some(reason) if reason.is_mandatory() => Ok(StateAssessment {
            status: GameStatus::Drawn(reason),
            check,
            legal_moves: BTreeSet::new(),
            claimable_draw: None,
        }),
        claimable => Ok(StateAssessment {
            status: GameStatus::Playing,
            check,
            legal_moves: moves,
            claimable_draw: claimable,
        }),
    }
}
