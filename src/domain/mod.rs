//! Pure chess domain: pieces, the visual board, notation and move history.

pub mod board;
pub mod chess;
pub mod history;
pub mod notation;
pub mod san;
pub mod uci;

pub use board::Board;
pub use chess::{GameOutcome, LegalMove, Piece, PieceColor, PieceKind, Promotion};
pub use history::MoveHistory;
pub use notation::{Coord, NotationError};
