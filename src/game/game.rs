//! The immutable game aggregate and its session state machine.
//!
//! A `Game` holds the current stage, the ordered history of
//! (stage, played-move) pairs, the precomputed legal-move set, and the draw
//! bookkeeping. Every operation returns a new `Game` value; once the status
//! leaves `Playing` no further moves are accepted.

use std::collections::{BTreeSet, HashMap};

use crate::board::piece::{Color, PieceKind};
use crate::board::piece_move::PieceMove;
use crate::errors::{ChessError, ChessResult};
use crate::game::detect::{detect, GameStatus};
use crate::game::draw::DrawReason;
use crate::game::stage::{PlayedMove, Stage};
use crate::rules::attacks::is_in_check;
use crate::rules::castling::ROOK_HOME_SQUARES;
use crate::board::square::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    status: GameStatus,
    history: Vec<(Stage, PlayedMove)>,
    current: Stage,
    legal_moves: BTreeSet<PieceMove>,
    claimable_draw: Option<DrawReason>,
    // Reduced-key occurrences of every stage strictly before the current one.
    position_counts: HashMap<String, u32>,
}

impl Game {
    /// A fresh game from the standard starting position.
    pub fn new() -> Self {
        Self::from_stage(Stage::initial()).expect("starting position is always consistent")
    }

    /// A game from a mid-game FEN. The position is validated once here;
    /// history starts at this stage (only the en-passant field carries
    /// prior-ply information, and it is preserved in the stage itself).
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let stage = crate::notation::fen::parse_fen(fen)?;
        validate_stage(&stage)?;
        let game = Self::from_stage(stage)?;
        tracing::debug!(fen, status = ?game.status, "constructed game from FEN");
        Ok(game)
    }

    fn from_stage(stage: Stage) -> ChessResult<Self> {
        let assessment = detect(&stage, false, &HashMap::new())?;
        Ok(Self {
            status: assessment.status,
            history: Vec::new(),
            current: stage,
            legal_moves: assessment.legal_moves,
            claimable_draw: assessment.claimable_draw,
            position_counts: HashMap::new(),
        })
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn current_stage(&self) -> &Stage {
        &self.current
    }

    /// The full legal-move set of the current stage; empty once the game is
    /// over.
    #[inline]
    pub fn legal_moves(&self) -> &BTreeSet<PieceMove> {
        &self.legal_moves
    }

    /// The claimable draw reason, meaningful only while playing.
    #[inline]
    pub fn claimable_draw(&self) -> Option<DrawReason> {
        self.claimable_draw
    }

    /// Ordered history of (stage, move played from it) pairs.
    #[inline]
    pub fn history(&self) -> &[(Stage, PlayedMove)] {
        &self.history
    }

    /// The reason the game is drawn; an error on a non-drawn game.
    pub fn draw_reason(&self) -> ChessResult<DrawReason> {
        match self.status {
            GameStatus::Drawn(reason) => Ok(reason),
            _ => Err(ChessError::IllegalState(
                "draw reason requested on a game that is not drawn".to_owned(),
            )),
        }
    }

    pub fn to_fen(&self) -> String {
        crate::notation::fen::generate_fen(&self.current)
    }

    /// Play a move, optionally offering a draw with it. Fails when the game
    /// is over or the move is not in the current legal-move set.
    pub fn make_move(&self, piece_move: PieceMove, offer_draw: bool) -> ChessResult<Game> {
        self.require_playing("make a move")?;
        if !self.legal_moves.contains(&piece_move) {
            return Err(ChessError::IllegalMove(piece_move.coordinate_text()));
        }

        let (next_stage, played) = self.current.play(&piece_move, offer_draw)?;

        let mut position_counts = self.position_counts.clone();
        *position_counts
            .entry(crate::notation::fen::reduced_fen(&self.current))
            .or_insert(0) += 1;

        let assessment = detect(&next_stage, offer_draw, &position_counts)?;

        let mut history = self.history.clone();
        history.push((self.current.clone(), played.clone()));

        tracing::debug!(
            notation = %played.notation,
            status = ?assessment.status,
            "applied move"
        );

        Ok(Game {
            status: assessment.status,
            history,
            current: next_stage,
            legal_moves: assessment.legal_moves,
            claimable_draw: assessment.claimable_draw,
            position_counts,
        })
    }

    /// Claim the currently claimable draw. Fails when the game is over or no
    /// claimable reason is present.
    pub fn claim_draw(&self) -> ChessResult<Game> {
        self.require_playing("claim a draw")?;
        let reason = self.claimable_draw.ok_or_else(|| {
            ChessError::IllegalState("no draw reason is claimable".to_owned())
        })?;

        tracing::debug!(?reason, "draw claimed");

        Ok(Game {
            status: GameStatus::Drawn(reason),
            history: self.history.clone(),
            current: self.current.clone(),
            legal_moves: BTreeSet::new(),
            claimable_draw: None,
            position_counts: self.position_counts.clone(),
        })
    }

    /// Resign on behalf of a color; the opponent wins.
    pub fn resign(&self, resigning_color: Color) -> ChessResult<Game> {
        self.require_playing("resign")?;

        let status = match resigning_color {
            Color::White => GameStatus::BlackWon,
            Color::Black => GameStatus::WhiteWon,
        };

        tracing::debug!(?resigning_color, "resignation");

        Ok(Game {
            status,
            history: self.history.clone(),
            current: self.current.clone(),
            legal_moves: BTreeSet::new(),
            claimable_draw: None,
            position_counts: self.position_counts.clone(),
        })
    }

    fn require_playing(&self, action: &str) -> ChessResult<()> {
        if self.status == GameStatus::Playing {
            Ok(())
        } else {
            Err(ChessError::IllegalState(format!(
                "cannot {action}: the game is over ({:?})",
                self.status
            )))
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Consistency checks applied once, when an external position is ingested.
fn validate_stage(stage: &Stage) -> ChessResult<()> {
    for color in [Color::White, Color::Black] {
        let kings = stage
            .position
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(ChessError::InconsistentPosition(format!(
                "expected exactly one {color:?} king, found {kings}"
            )));
        }
    }

    if is_in_check(&stage.position, stage.active_color.opposite())? {
        return Err(ChessError::InconsistentPosition(
            "the side not to move is in check".to_owned(),
        ));
    }

    for (rook_home, bit) in ROOK_HOME_SQUARES {
        if stage.castling_rights & bit == 0 {
            continue;
        }
        let rank = rook_home.rank_index();
        let color = if rank == 0 { Color::White } else { Color::Black };
        let king_ok = stage.position.piece_at(Square::at(4, rank))
            == Some(crate::board::piece::Piece::new(PieceKind::King, color));
        let rook_ok = stage.position.piece_at(rook_home)
            == Some(crate::board::piece::Piece::new(PieceKind::Rook, color));
        if !king_ok || !rook_ok {
            return Err(ChessError::InconsistentPosition(format!(
                "castling right set without {color:?} king and rook on their home squares"
            )));
        }
    }

    Ok(())
}
