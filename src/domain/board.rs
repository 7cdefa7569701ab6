//! The visual board: an 8x8 grid of pieces mirrored from the rule authority.
//!
//! The grid does no legality checking of its own. Every cell always holds a
//! `Piece`, with `Piece::Empty` standing for a vacant square.

use serde::{Deserialize, Serialize};

use crate::domain::chess::{Piece, PieceKind};
use crate::domain::notation::{BOARD_SIZE, Coord, to_algebraic_square};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Piece; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Standard starting layout, black on row 0
    pub fn new() -> Self {
        use PieceKind::*;

        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut board = Self::empty();
        for (col, kind) in back.into_iter().enumerate() {
            board.grid[0][col] = Piece::black(kind);
            board.grid[1][col] = Piece::black(Pawn);
            board.grid[6][col] = Piece::white(Pawn);
            board.grid[7][col] = Piece::white(kind);
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            grid: [[Piece::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Mirror the piece placement of a shakmaty board
    pub fn from_shakmaty(board: &shakmaty::Board) -> Self {
        let mut grid = Self::empty();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let square = Coord::new(row, col);
                if let Some(piece) = square.to_square().and_then(|sq| board.piece_at(sq)) {
                    grid.set(square, Piece::from_shakmaty(piece));
                }
            }
        }
        grid
    }

    /// Out-of-range coordinates read as `Empty`.
    pub fn get(&self, square: Coord) -> Piece {
        if !square.in_bounds() {
            return Piece::Empty;
        }
        self.grid[square.row][square.col]
    }

    pub fn set(&mut self, square: Coord, piece: Piece) {
        if square.in_bounds() {
            self.grid[square.row][square.col] = piece;
        }
    }

    /// Move whatever is on `from` to `to`, leaving `from` empty.
    /// Relocating a square onto itself keeps the piece in place.
    pub fn relocate(&mut self, from: Coord, to: Coord) {
        if from == to || !from.in_bounds() || !to.in_bounds() {
            return;
        }
        let piece = self.get(from);
        self.set(to, piece);
        self.set(from, Piece::Empty);
    }

    /// Row-major glyph grid for the rendering layer
    pub fn to_display_grid(&self) -> Vec<Vec<String>> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|piece| piece.glyph().to_string()).collect())
            .collect()
    }

    /// Rank labels, top row first
    pub fn rank_labels() -> Vec<String> {
        (0..BOARD_SIZE)
            .filter_map(|row| to_algebraic_square(row, 0))
            .map(|name| name[1..].to_string())
            .collect()
    }

    /// File labels, left column first
    pub fn file_labels() -> Vec<String> {
        (0..BOARD_SIZE)
            .filter_map(|col| to_algebraic_square(0, col))
            .map(|name| name[..1].to_string())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::PieceColor;
    use PieceKind::*;

    fn count(board: &Board, color: PieceColor) -> usize {
        board
            .grid
            .iter()
            .flatten()
            .filter(|piece| piece.belongs_to(color))
            .count()
    }

    #[test]
    fn test_starting_layout() {
        let board = Board::new();
        assert_eq!(count(&board, PieceColor::White), 16);
        assert_eq!(count(&board, PieceColor::Black), 16);
        for row in 2..6 {
            for col in 0..BOARD_SIZE {
                assert!(board.get(Coord::new(row, col)).is_empty());
            }
        }
        assert_eq!(board.get(Coord::new(7, 4)), Piece::white(King));
        assert_eq!(board.get(Coord::new(0, 3)), Piece::black(Queen));
        assert_eq!(board.get(Coord::new(6, 0)), Piece::white(Pawn));
        assert_eq!(board.get(Coord::new(1, 7)), Piece::black(Pawn));
    }

    #[test]
    fn test_relocate_clears_source() {
        let mut board = Board::new();
        let e2 = Coord::new(6, 4);
        let e4 = Coord::new(4, 4);
        board.relocate(e2, e4);
        assert!(board.get(e2).is_empty());
        assert_eq!(board.get(e4), Piece::white(Pawn));
    }

    #[test]
    fn test_relocate_overwrites_capture() {
        let mut board = Board::new();
        let d1 = Coord::new(7, 3);
        let d7 = Coord::new(1, 3);
        board.relocate(d1, d7);
        assert_eq!(board.get(d7), Piece::white(Queen));
        assert_eq!(count(&board, PieceColor::Black), 15);
    }

    #[test]
    fn test_relocate_onto_itself_keeps_piece() {
        let mut board = Board::new();
        let g1 = Coord::new(7, 6);
        board.relocate(g1, g1);
        assert_eq!(board.get(g1), Piece::white(Knight));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut board = Board::new();
        let off = Coord::new(8, 0);
        assert!(board.get(off).is_empty());
        board.set(off, Piece::white(Queen));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_grid() {
        let grid = Board::new().to_display_grid();
        assert_eq!(grid.len(), 8);
        assert_eq!(grid[0][0], "♜");
        assert_eq!(grid[7][4], "♔");
        assert_eq!(grid[4][4], " ");
    }

    #[test]
    fn test_mirrors_shakmaty_board() {
        assert_eq!(Board::from_shakmaty(&shakmaty::Board::new()), Board::new());

        let board = testing::board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(board.get(Coord::new(3, 3)), Piece::black(Pawn));
        assert_eq!(board.get(Coord::new(4, 4)), Piece::white(Pawn));
        assert_eq!(board.get(Coord::new(0, 4)), Piece::black(King));
        assert_eq!(count(&board, PieceColor::White), 2);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Board::rank_labels().first().map(String::as_str), Some("8"));
        assert_eq!(Board::file_labels().last().map(String::as_str), Some("h"));
    }
}
