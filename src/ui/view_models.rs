//! View models for rendering one frame of the terminal UI.
//!
//! These types are DTOs (Data Transfer Objects) that prepare game state
//! for display. They live in the UI layer, not the domain layer.

use serde::Serialize;

use crate::domain::{GameOutcome, Piece, PieceColor};

/// Display data for one board square
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SquareDisplay {
    pub glyph: String,
    pub is_cursor: bool,
    /// Source square of the armed selection
    pub is_selected: bool,
}

/// Everything the renderer needs for one frame
#[derive(Clone, Debug, Serialize)]
pub struct Frame {
    /// Row 0 is rank 8
    pub squares: Vec<Vec<SquareDisplay>>,
    pub rank_labels: Vec<String>,
    pub file_labels: Vec<String>,
    pub current_player: PieceColor,
    pub selected_piece: Option<Piece>,
    /// Legal moves (UCI) from the selected square
    pub valid_moves: Vec<String>,
    /// Ledger text, one numbered line per move pair
    pub history: String,
    /// "e4 (e2e4)"
    pub last_move: Option<String>,
    /// "Best Move: .., Ponder: .."
    pub suggestion: Option<String>,
    pub evaluation: Option<String>,
    pub outcome: GameOutcome,
    /// Last rejected move or engine problem
    pub status: Option<String>,
}
