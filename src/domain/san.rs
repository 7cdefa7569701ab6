//! Standard algebraic notation for moves committed on the board.
//!
//! Disambiguation only ever adds the source file, never the rank.

use crate::domain::board::Board;
use crate::domain::chess::{GameOutcome, LegalMove, Piece, PieceKind, Promotion};
use crate::domain::notation::Coord;

/// King moves that denote castling: (from, to, king side)
const CASTLING_PAIRS: [(Coord, Coord, bool); 4] = [
    (Coord::new(7, 4), Coord::new(7, 6), true),
    (Coord::new(7, 4), Coord::new(7, 2), false),
    (Coord::new(0, 4), Coord::new(0, 6), true),
    (Coord::new(0, 4), Coord::new(0, 2), false),
];

/// `Some(true)` for king side, `Some(false)` for queen side
pub fn castling_side(from: Coord, to: Coord) -> Option<bool> {
    CASTLING_PAIRS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, king_side)| *king_side)
}

/// Everything the translator needs to know about one committed move
pub struct MoveContext<'a> {
    pub from: Coord,
    pub to: Coord,
    /// The mover as it stood before the move
    pub piece: Piece,
    pub capture: bool,
    pub promotion: Option<Promotion>,
    /// Board before the move, used to identify the pieces behind legal moves
    pub board: &'a Board,
    /// Legal moves of the position the move was played from
    pub legal_moves: &'a [LegalMove],
    /// Outcome after the move
    pub outcome: GameOutcome,
    /// Whether the side now to move is in check
    pub check: bool,
}

pub fn to_algebraic(ctx: &MoveContext) -> String {
    let mut san = body(ctx);

    match ctx.outcome {
        GameOutcome::WhiteWon | GameOutcome::BlackWon => {
            san.push_str("# ");
            san.push_str(ctx.outcome.result_text());
        }
        GameOutcome::Draw => {
            san.push(' ');
            san.push_str(ctx.outcome.result_text());
        }
        GameOutcome::Ongoing if ctx.check => san.push('+'),
        GameOutcome::Ongoing => {}
    }
    san
}

fn body(ctx: &MoveContext) -> String {
    let Some(kind) = ctx.piece.kind() else {
        return ctx.to.to_string();
    };
    let destination = ctx.to.to_string();
    let capture = if ctx.capture { "x" } else { "" };

    match kind {
        PieceKind::King => match castling_side(ctx.from, ctx.to) {
            Some(true) => "O-O".to_string(),
            Some(false) => "O-O-O".to_string(),
            None => format!("K{capture}{destination}"),
        },
        PieceKind::Pawn => {
            let mut san = if ctx.capture {
                format!("{}x{destination}", source_file(ctx.from))
            } else {
                destination
            };
            if let Some(promotion) = ctx.promotion {
                san.push('=');
                san.push_str(promotion.kind().letter());
            }
            san
        }
        PieceKind::Knight | PieceKind::Rook | PieceKind::Queen => {
            let file = if is_ambiguous(ctx) {
                source_file(ctx.from)
            } else {
                String::new()
            };
            format!("{}{file}{capture}{destination}", ctx.piece.name())
        }
        PieceKind::Bishop => format!("B{capture}{destination}"),
    }
}

/// More than one legal move of the same piece lands on the destination
fn is_ambiguous(ctx: &MoveContext) -> bool {
    ctx.legal_moves
        .iter()
        .filter(|m| m.to == ctx.to && ctx.board.get(m.from) == ctx.piece)
        .count()
        > 1
}

fn source_file(square: Coord) -> String {
    square.to_string()[..1].to_string()
}
