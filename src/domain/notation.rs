//! Conversion between grid coordinates, square names and UCI move strings.
//!
//! Row 0 is rank 8 and column 0 is file `a`, so `(6, 4)` is `e2`.

use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::{File, Rank, Square};
use thiserror::Error;

use crate::domain::chess::Promotion;

pub const BOARD_SIZE: usize = 8;

const FILES: &[u8; BOARD_SIZE] = b"abcdefgh";

/// A square on the grid, row-major, row 0 = rank 8
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Parse a square name, e.g. `"e4"`
    pub fn parse(square: &str) -> Result<Self, NotationError> {
        from_algebraic_square(square)
    }

    /// The matching shakmaty square, `None` when off the board
    pub fn to_square(self) -> Option<Square> {
        if !self.in_bounds() {
            return None;
        }
        let file = File::new(self.col as u32);
        let rank = Rank::new((BOARD_SIZE - 1 - self.row) as u32);
        Some(Square::from_coords(file, rank))
    }

    pub fn from_square(square: Square) -> Self {
        Self::new(
            BOARD_SIZE - 1 - square.rank() as usize,
            square.file() as usize,
        )
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match to_algebraic_square(self.row, self.col) {
            Some(name) => f.write_str(&name),
            None => write!(f, "({}, {})", self.row, self.col),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid square format: {0:?}")]
    InvalidFormat(String),
    #[error("square out of bounds: {0:?}")]
    OutOfBounds(String),
}

/// Square name for a grid position, `None` when off the board
pub fn to_algebraic_square(row: usize, col: usize) -> Option<String> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return None;
    }
    let file = FILES[col] as char;
    let rank = BOARD_SIZE - row;
    Some(format!("{file}{rank}"))
}

/// Grid position for a square name such as `"e2"`
pub fn from_algebraic_square(square: &str) -> Result<Coord, NotationError> {
    let invalid = || NotationError::InvalidFormat(square.to_string());

    let mut chars = square.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(invalid());
    };
    if !file.is_ascii_alphabetic() {
        return Err(invalid());
    }
    let rank = rank.to_digit(10).ok_or_else(invalid)? as i64;

    let col = file as i64 - 'a' as i64;
    let row = BOARD_SIZE as i64 - rank;
    if !(0..BOARD_SIZE as i64).contains(&col) || !(0..BOARD_SIZE as i64).contains(&row) {
        return Err(NotationError::OutOfBounds(square.to_string()));
    }
    Ok(Coord::new(row as usize, col as usize))
}

/// Coordinate move string, e.g. `e2e4` or `e7e8q`
pub fn to_uci_move(from: Coord, to: Coord, promotion: Option<Promotion>) -> Option<String> {
    let mut uci = to_algebraic_square(from.row, from.col)?;
    uci.push_str(&to_algebraic_square(to.row, to.col)?);
    if let Some(promotion) = promotion {
        uci.push(promotion.uci_char());
    }
    Some(uci)
}
