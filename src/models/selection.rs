//! Cursor and selection state.
//!
//! `Idle` means nothing is selected; `Armed` holds a snapshot of the selected
//! square and the piece that stood there when it was picked.

use crate::domain::notation::BOARD_SIZE;
use crate::domain::{Board, Coord, Piece, PieceColor};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectionState {
    Idle,
    Armed { from: Coord, piece: Piece },
}

#[derive(Clone, Debug)]
pub struct Selection {
    cursor: Coord,
    state: SelectionState,
}

impl Selection {
    /// Cursor starts on e2
    pub fn new() -> Self {
        Self {
            cursor: Coord::new(6, 4),
            state: SelectionState::Idle,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.state, SelectionState::Armed { .. })
    }

    pub fn selected(&self) -> Option<(Coord, Piece)> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::Armed { from, piece } => Some((from, piece)),
        }
    }

    /// Move the cursor one square, stopping at the board edge
    pub fn move_cursor(&mut self, direction: Direction) {
        let Coord { row, col } = self.cursor;
        self.cursor = match direction {
            Direction::Up => Coord::new(row.saturating_sub(1), col),
            Direction::Down => Coord::new((row + 1).min(BOARD_SIZE - 1), col),
            Direction::Left => Coord::new(row, col.saturating_sub(1)),
            Direction::Right => Coord::new(row, (col + 1).min(BOARD_SIZE - 1)),
        };
    }

    /// Place the cursor directly, clamped to the board
    pub fn set_cursor(&mut self, square: Coord) {
        self.cursor = Coord::new(square.row.min(BOARD_SIZE - 1), square.col.min(BOARD_SIZE - 1));
    }

    /// Select the piece under the cursor if it belongs to `player`.
    /// Returns whether the selection was made.
    pub fn arm(&mut self, board: &Board, player: PieceColor) -> bool {
        let piece = board.get(self.cursor);
        if !piece.belongs_to(player) {
            return false;
        }
        self.state = SelectionState::Armed {
            from: self.cursor,
            piece,
        };
        true
    }

    pub fn disarm(&mut self) {
        self.state = SelectionState::Idle;
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}
