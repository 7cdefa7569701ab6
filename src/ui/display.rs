//! Frame generation.
//!
//! This module transforms game state into display-ready view models.
//! It lives in the UI layer and depends on domain + models, not vice versa.

use crate::domain::Board;
use crate::models::game::MoveRecord;
use crate::models::{GameModel, RuleAuthority, Suggestion};
use crate::ui::view_models::{Frame, SquareDisplay};

/// Principal variation moves shown after the score
const PV_PREVIEW: usize = 4;

/// Snapshot the game for rendering
pub fn build_frame<A: RuleAuthority>(
    game: &GameModel<A>,
    last_move: Option<&MoveRecord>,
    suggestion: Option<&Suggestion>,
    status: Option<&str>,
) -> Frame {
    let selection = game.selection();
    let cursor = selection.cursor();
    let selected = selection.selected();
    let grid = game.board().to_display_grid();

    let squares = grid
        .into_iter()
        .enumerate()
        .map(|(row, glyphs)| {
            glyphs
                .into_iter()
                .enumerate()
                .map(|(col, glyph)| SquareDisplay {
                    glyph,
                    is_cursor: cursor.row == row && cursor.col == col,
                    is_selected: selected
                        .is_some_and(|(from, _)| from.row == row && from.col == col),
                })
                .collect()
        })
        .collect();

    let evaluation = suggestion
        .and_then(|s| s.info.as_ref())
        .and_then(|info| {
            let mut text = format!("Eval: {} (depth {})", info.score?.display(), info.depth?);
            for uci in info.pv.iter().take(PV_PREVIEW) {
                text.push(' ');
                text.push_str(uci);
            }
            Some(text)
        });

    Frame {
        squares,
        rank_labels: Board::rank_labels(),
        file_labels: Board::file_labels(),
        current_player: game.current_player(),
        selected_piece: selected.map(|(_, piece)| piece),
        valid_moves: game.selected_moves(),
        history: game.history().text().to_string(),
        last_move: last_move.map(|record| format!("{} ({})", record.san, record.uci)),
        suggestion: suggestion.map(Suggestion::summary),
        evaluation,
        outcome: game.outcome(),
        status: status.map(str::to_string),
    }
}
