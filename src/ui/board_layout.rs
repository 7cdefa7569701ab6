//! Board layout calculations - where things sit on the terminal grid.

use crate::domain::Coord;
use crate::domain::notation::BOARD_SIZE;
use crate::ui::theme::{CELL_HEIGHT, CELL_WIDTH};

/// Terminal positions of the board and the panels around it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    /// Column of the left edge of the a-file
    pub origin_x: u16,
    /// Row of the top edge of the 8th rank
    pub origin_y: u16,
}

impl BoardLayout {
    pub fn new(origin_x: u16, origin_y: u16) -> Self {
        Self { origin_x, origin_y }
    }

    pub fn board_width(&self) -> u16 {
        CELL_WIDTH * BOARD_SIZE as u16
    }

    pub fn board_height(&self) -> u16 {
        CELL_HEIGHT * BOARD_SIZE as u16
    }

    /// Convert a terminal cell to a board square (if within board)
    pub fn pos_to_square(&self, x: u16, y: u16) -> Option<Coord> {
        let board_x = x.checked_sub(self.origin_x)?;
        let board_y = y.checked_sub(self.origin_y)?;

        let col = (board_x / CELL_WIDTH) as usize;
        let row = (board_y / CELL_HEIGHT) as usize;

        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Coord::new(row, col))
        } else {
            None
        }
    }

    /// Top-left terminal cell of a square
    pub fn square_origin(&self, square: Coord) -> (u16, u16) {
        (
            self.origin_x + square.col as u16 * CELL_WIDTH,
            self.origin_y + square.row as u16 * CELL_HEIGHT,
        )
    }

    /// Column where rank labels are drawn
    pub fn rank_label_x(&self) -> u16 {
        self.origin_x.saturating_sub(2)
    }

    /// Row of the file labels under the board
    pub fn file_label_y(&self) -> u16 {
        self.origin_y + self.board_height()
    }

    /// Left edge of the move list
    pub fn move_list_x(&self) -> u16 {
        self.origin_x + self.board_width() + 3
    }

    /// First row of the footer
    pub fn footer_y(&self) -> u16 {
        self.file_label_y() + 2
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pos_to_square_corners() {
        let layout = BoardLayout::default();
        assert_eq!(layout.pos_to_square(3, 2), Some(Coord::new(0, 0)));
        assert_eq!(layout.pos_to_square(3 + 6, 2 + 2), Some(Coord::new(0, 0)));
        assert_eq!(layout.pos_to_square(3 + 7, 2), Some(Coord::new(0, 1)));
        assert_eq!(layout.pos_to_square(3 + 55, 2 + 23), Some(Coord::new(7, 7)));
    }

    #[test]
    fn test_pos_outside_board() {
        let layout = BoardLayout::default();
        assert_eq!(layout.pos_to_square(2, 5), None);
        assert_eq!(layout.pos_to_square(10, 1), None);
        assert_eq!(layout.pos_to_square(3 + 56, 5), None);
        assert_eq!(layout.pos_to_square(10, 2 + 24), None);
    }

    #[test]
    fn test_square_origin_round_trip() {
        let layout = BoardLayout::default();
        let e2 = Coord::new(6, 4);
        let (x, y) = layout.square_origin(e2);
        assert_eq!((x, y), (3 + 28, 2 + 18));
        assert_eq!(layout.pos_to_square(x + 3, y + 1), Some(e2));
    }

    #[test]
    fn test_panels_do_not_overlap_board() {
        let layout = BoardLayout::default();
        assert!(layout.move_list_x() > layout.origin_x + layout.board_width());
        assert!(layout.footer_y() > layout.file_label_y());
    }
}
