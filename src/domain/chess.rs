//! Pure chess domain types and utilities.
//! No terminal or process dependencies - this is the domain layer.

use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::{Color as SColor, Role};

use crate::domain::notation::Coord;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Letter used in algebraic notation; pawns have none
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Rook => "R",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    pub fn opponent(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Row holding this color's king and rooks at the start
    pub fn back_row(self) -> usize {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }

    /// Row this color's pawns start on
    pub fn pawn_row(self) -> usize {
        match self {
            PieceColor::White => 6,
            PieceColor::Black => 1,
        }
    }

    /// Row where this color's pawns promote
    pub fn promotion_row(self) -> usize {
        self.opponent().back_row()
    }
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => f.write_str("white"),
            PieceColor::Black => f.write_str("black"),
        }
    }
}

/// Occupant of a single board cell. `Empty` is a real value, never "absent".
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    Occupied { kind: PieceKind, color: PieceColor },
}

impl Piece {
    pub const fn new(kind: PieceKind, color: PieceColor) -> Self {
        Piece::Occupied { kind, color }
    }

    pub const fn white(kind: PieceKind) -> Self {
        Self::new(kind, PieceColor::White)
    }

    pub const fn black(kind: PieceKind) -> Self {
        Self::new(kind, PieceColor::Black)
    }

    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Piece::Empty => None,
            Piece::Occupied { kind, .. } => Some(kind),
        }
    }

    pub fn color(self) -> Option<PieceColor> {
        match self {
            Piece::Empty => None,
            Piece::Occupied { color, .. } => Some(color),
        }
    }

    pub fn is_kind(self, kind: PieceKind) -> bool {
        self.kind() == Some(kind)
    }

    pub fn belongs_to(self, color: PieceColor) -> bool {
        self.color() == Some(color)
    }

    /// Notation letter, empty for pawns and empty squares
    pub fn name(self) -> &'static str {
        self.kind().map_or("", PieceKind::letter)
    }

    pub fn glyph(self) -> &'static str {
        use PieceColor::*;
        use PieceKind::*;

        match self {
            Piece::Empty => " ",
            Piece::Occupied { kind, color } => match (kind, color) {
                (Pawn, White) => "♙",
                (Rook, White) => "♖",
                (Knight, White) => "♘",
                (Bishop, White) => "♗",
                (Queen, White) => "♕",
                (King, White) => "♔",
                (Pawn, Black) => "♟",
                (Rook, Black) => "♜",
                (Knight, Black) => "♞",
                (Bishop, Black) => "♝",
                (Queen, Black) => "♛",
                (King, Black) => "♚",
            },
        }
    }

    /// Convert a shakmaty piece to our domain Piece
    pub fn from_shakmaty(piece: shakmaty::Piece) -> Self {
        let kind = match piece.role {
            Role::Pawn => PieceKind::Pawn,
            Role::Knight => PieceKind::Knight,
            Role::Bishop => PieceKind::Bishop,
            Role::Rook => PieceKind::Rook,
            Role::Queen => PieceKind::Queen,
            Role::King => PieceKind::King,
        };
        Piece::new(kind, PieceColor::from(piece.color))
    }
}

/// Pieces a pawn may promote to, keyed by their UCI suffix letter.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }

    pub fn uci_char(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Promotion::Queen => "Queen",
            Promotion::Rook => "Rook",
            Promotion::Bishop => "Bishop",
            Promotion::Knight => "Knight",
        }
    }
}

/// One entry of the rule authority's legal-move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Coord,
    pub to: Coord,
    /// Coordinate form, e.g. `e2e4` or `e7e8q`
    pub uci: String,
}

/// Game result as reported by the rule authority
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    Ongoing,
    WhiteWon,
    BlackWon,
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::Ongoing
    }

    /// PGN-style result text
    pub fn result_text(self) -> &'static str {
        match self {
            GameOutcome::Ongoing => "*",
            GameOutcome::WhiteWon => "1-0",
            GameOutcome::BlackWon => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_attributes() {
        let knight = Piece::black(PieceKind::Knight);
        assert_eq!(knight.color(), Some(PieceColor::Black));
        assert_eq!(knight.kind(), Some(PieceKind::Knight));
        assert_eq!(knight.name(), "N");
        assert_eq!(knight.glyph(), "♞");
        assert!(!knight.is_empty());
    }

    #[test]
    fn test_pawn_and_empty_have_no_letter() {
        assert_eq!(Piece::white(PieceKind::Pawn).name(), "");
        assert_eq!(Piece::Empty.name(), "");
        assert_eq!(Piece::Empty.color(), None);
        assert!(!Piece::Empty.belongs_to(PieceColor::White));
        assert!(!Piece::Empty.belongs_to(PieceColor::Black));
    }

    #[test]
    fn test_color_rows() {
        assert_eq!(PieceColor::White.promotion_row(), 0);
        assert_eq!(PieceColor::Black.promotion_row(), 7);
        assert_eq!(PieceColor::White.pawn_row(), 6);
        assert_eq!(PieceColor::Black.pawn_row(), 1);
        assert_eq!(PieceColor::White.opponent(), PieceColor::Black);
    }

    #[test]
    fn test_from_shakmaty() {
        assert_eq!(
            Piece::from_shakmaty(shakmaty::Piece {
                color: SColor::White,
                role: Role::Queen,
            }),
            Piece::white(PieceKind::Queen)
        );
        assert_eq!(
            Piece::from_shakmaty(shakmaty::Piece {
                color: SColor::Black,
                role: Role::Pawn,
            }),
            Piece::black(PieceKind::Pawn)
        );
    }

    #[test]
    fn test_promotion_letters() {
        for promotion in Promotion::ALL {
            assert_eq!(Promotion::from_char(promotion.uci_char()), Some(promotion));
        }
        assert_eq!(Promotion::from_char('k'), None);
        assert_eq!(Promotion::Knight.kind(), PieceKind::Knight);
    }

    #[test]
    fn test_outcome_text() {
        assert!(!GameOutcome::Ongoing.is_over());
        assert_eq!(GameOutcome::WhiteWon.result_text(), "1-0");
        assert_eq!(GameOutcome::Draw.result_text(), "1/2-1/2");
    }
}
