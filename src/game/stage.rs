//! One position plus its full game-rules context, and the transition that
//! advances it.
//!
//! `Stage::play` computes the played-move record (captured piece, check kind
//! against the resulting position, notation), updates castling rights,
//! clocks, and the en-passant target, and flips the active color. Stages are
//! immutable; playing a move produces a new one.

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::errors::ChessResult;
use crate::notation::san::to_notation;
use crate::rules::attacks::is_in_check;
use crate::rules::castling::{rights_after_move, CastlingRights, CASTLE_ALL};
use crate::rules::legal_moves::legal_moves;

/// How a move affects the opposing king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    None,
    Check,
    Checkmate,
}

/// The record of a move after it has been applied to a stage. Never
/// constructed independently of a stage transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayedMove {
    pub piece_move: PieceMove,
    pub captured: Option<Piece>,
    pub check: CheckKind,
    pub draw_offered: bool,
    pub notation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub position: Position,
    pub active_color: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub last_move: Option<PlayedMove>,
}

impl Stage {
    /// The standard starting stage.
    pub fn initial() -> Self {
        Self {
            position: Position::initial(),
            active_color: Color::White,
            castling_rights: CASTLE_ALL,
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            last_move: None,
        }
    }

    /// Apply a move, producing the next stage and the move's record. The
    /// caller is responsible for having validated legality; this performs
    /// the transition only.
    pub fn play(
        &self,
        piece_move: &PieceMove,
        draw_offered: bool,
    ) -> ChessResult<(Stage, PlayedMove)> {
        let mover = self.active_color;
        let opponent = mover.opposite();

        let en_passant_capture = piece_move.piece.kind == PieceKind::Pawn
            && piece_move.from.file_index() != piece_move.to.file_index()
            && self.position.piece_at(piece_move.to).is_none();
        let captured = if en_passant_capture {
            Some(Piece::new(PieceKind::Pawn, opponent))
        } else {
            self.position.piece_at(piece_move.to)
        };

        let next_position = self.position.after_move(piece_move);
        let next_rights = rights_after_move(self.castling_rights, piece_move);
        let next_en_passant = en_passant_target(piece_move);

        let halfmove_clock = if piece_move.piece.kind == PieceKind::Pawn || captured.is_some() {
            0
        } else {
            self.halfmove_clock + 1
        };
        let fullmove_number = if mover == Color::Black {
            self.fullmove_number + 1
        } else {
            self.fullmove_number
        };

        // Check kind is judged against the resulting position and the
        // opponent's legal replies in it.
        let in_check = is_in_check(&next_position, opponent)?;
        let replies = legal_moves(&next_position, next_en_passant, next_rights, opponent)?;
        let check = if in_check && replies.is_empty() {
            CheckKind::Checkmate
        } else if in_check {
            CheckKind::Check
        } else {
            CheckKind::None
        };

        let mover_moves = legal_moves(
            &self.position,
            self.en_passant_target,
            self.castling_rights,
            mover,
        )?;
        let notation = to_notation(&self.position, &mover_moves, piece_move, draw_offered, check);

        let played = PlayedMove {
            piece_move: *piece_move,
            captured,
            check,
            draw_offered,
            notation,
        };

        let stage = Stage {
            position: next_position,
            active_color: opponent,
            castling_rights: next_rights,
            en_passant_target: next_en_passant,
            halfmove_clock,
            fullmove_number,
            last_move: Some(played.clone()),
        };

        Ok((stage, played))
    }
}

/// The en-passant target produced by a move: the square behind a two-square
/// pawn advance, absent for every other move.
pub fn en_passant_target(piece_move: &PieceMove) -> Option<Square> {
    if piece_move.piece.kind != PieceKind::Pawn {
        return None;
    }
    let d_rank = piece_move.to.rank_index() as i8 - piece_move.from.rank_index() as i8;
    if d_rank.abs() != 2 {
        return None;
    }
    piece_move.from.offset(0, d_rank / 2)
}
