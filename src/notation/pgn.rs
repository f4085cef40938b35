//! Portable Game Notation export.
//!
//! Write-only: renders a finished or in-progress game as a PGN record with
//! the seven-tag roster, a `SetUp`/`FEN` pair when the game did not start
//! from the standard position, and the numbered movetext. Draw-offer markers
//! are part of the stored notation but are stripped from the movetext.

use crate::board::piece::Color;
use crate::game::detect::GameStatus;
use crate::game::game::Game;
use crate::notation::fen::{generate_fen, STARTING_POSITION_FEN};

pub fn write_pgn(game: &Game) -> String {
    let initial_stage = game
        .history()
        .first()
        .map(|(stage, _)| stage)
        .unwrap_or_else(|| game.current_stage());
    let initial_fen = generate_fen(initial_stage);

    let result = result_token(game.status());

    let mut headers: Vec<(&str, String)> = vec![
        ("Event", "Casual game".to_owned()),
        ("Site", "?".to_owned()),
        ("Date", chrono::Local::now().format("%Y.%m.%d").to_string()),
        ("Round", "?".to_owned()),
        ("White", "?".to_owned()),
        ("Black", "?".to_owned()),
        ("Result", result.to_owned()),
    ];
    if initial_fen != STARTING_POSITION_FEN {
        headers.push(("SetUp", "1".to_owned()));
        headers.push(("FEN", initial_fen));
    }

    let mut out = String::new();
    for (tag, value) in &headers {
        out.push_str(&format!("[{tag} \"{value}\"]\n"));
    }
    out.push('\n');

    let mut tokens: Vec<String> = Vec::new();
    for (index, (stage, played)) in game.history().iter().enumerate() {
        let trimmed = played.notation.trim_end_matches(" (=)");
        // An undisambiguated pawn capture is stored as "xd6"; PGN readers
        // expect the source file, so it is restored here.
        let san = if trimmed.starts_with('x') {
            format!("{}{trimmed}", played.piece_move.from.file_char())
        } else {
            trimmed.to_owned()
        };
        match stage.active_color {
            Color::White => {
                tokens.push(format!("{}. {san}", stage.fullmove_number));
            }
            Color::Black => {
                // A game ingested mid-ply opens with Black's move.
                if index == 0 {
                    tokens.push(format!("{}... {san}", stage.fullmove_number));
                } else {
                    tokens.push(san);
                }
            }
        }
    }
    tokens.push(result.to_owned());
    out.push_str(&tokens.join(" "));
    out.push('\n');

    out
}

fn result_token(status: GameStatus) -> &'static str {
    match status {
        GameStatus::WhiteWon => "1-0",
        GameStatus::BlackWon => "0-1",
        GameStatus::Drawn(_) => "1/2-1/2",
        GameStatus::Playing => "*",
    }
}
