//! Game state model - the application layer for chess game state.
//!
//! `GameModel` owns the visual board, the cursor/selection state and the move
//! history, and mirrors every move the rule authority accepts onto the board.
//! Special squares the coordinate move does not spell out (the castling rook,
//! the pawn taken en passant, the promoted piece) are patched in here.

use shakmaty::fen::Fen;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::notation::to_uci_move;
use crate::domain::san::{self, MoveContext};
use crate::domain::{
    Board, Coord, GameOutcome, MoveHistory, NotationError, Piece, PieceColor, PieceKind, Promotion,
};
use crate::models::authority::{AuthorityError, RuleAuthority, ShakmatyAuthority};
use crate::models::selection::{Direction, Selection, SelectionState};

/// Asked for a piece when a pawn reaches its last rank.
/// Returning `None` means the prompt was dismissed.
pub trait PromotionPrompt {
    fn choose(&mut self, color: PieceColor) -> Option<Promotion>;
}

/// Input events from the terminal
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Cursor(Direction),
    Commit,
    Cancel,
    /// Mouse click on a square: moves the cursor there, then commits
    Click(Coord),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("a piece cannot move onto its own square")]
    SelfMove,
    #[error("no piece on {0}")]
    EmptySource(Coord),
    #[error("the game is over")]
    GameOver,
    #[error("{0} is occupied by your own piece")]
    OwnPieceCapture(Coord),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error("{uci} rejected: {reason}")]
    Rejected { uci: String, reason: AuthorityError },
    #[error(transparent)]
    Position(#[from] AuthorityError),
}

/// A move accepted by the authority and applied to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub uci: String,
    pub san: String,
}

/// What handling one event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed apart from maybe the cursor
    Idle,
    Armed,
    Cancelled,
    Moved(MoveRecord),
    Rejected(MoveError),
}

/// The main game model containing all chess game state
pub struct GameModel<A: RuleAuthority = ShakmatyAuthority> {
    board: Board,
    selection: Selection,
    authority: A,
    current_player: PieceColor,
    en_passant: Option<Coord>,
    history: MoveHistory,
}

impl GameModel<ShakmatyAuthority> {
    /// Standard game from the starting position
    pub fn new() -> Self {
        Self::with_parts(Board::new(), ShakmatyAuthority::new(), PieceColor::White, None)
    }

    /// Game starting from an arbitrary FEN
    pub fn from_fen(fen: &str) -> Result<Self, MoveError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| AuthorityError::InvalidFen(fen.to_string()))?;
        let setup = parsed.as_setup();
        let board = Board::from_shakmaty(&setup.board);
        let player = PieceColor::from(setup.turn);
        let en_passant = setup.ep_square.map(Coord::from_square);

        let authority = ShakmatyAuthority::from_parsed(fen, parsed)?;
        Ok(Self::with_parts(board, authority, player, en_passant))
    }
}

impl Default for GameModel<ShakmatyAuthority> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RuleAuthority> GameModel<A> {
    pub fn with_parts(
        board: Board,
        authority: A,
        current_player: PieceColor,
        en_passant: Option<Coord>,
    ) -> Self {
        Self {
            board,
            selection: Selection::new(),
            authority,
            current_player,
            en_passant,
            history: MoveHistory::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn current_player(&self) -> PieceColor {
        self.current_player
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn outcome(&self) -> GameOutcome {
        self.authority.outcome()
    }

    /// Legal moves (UCI) starting from the selected square
    pub fn selected_moves(&self) -> Vec<String> {
        let Some((from, _)) = self.selection.selected() else {
            return Vec::new();
        };
        self.authority
            .legal_moves()
            .into_iter()
            .filter(|m| m.from == from)
            .map(|m| m.uci)
            .collect()
    }

    pub fn handle(&mut self, event: GameEvent, prompt: &mut dyn PromotionPrompt) -> Transition {
        match event {
            GameEvent::Cursor(direction) => {
                self.selection.move_cursor(direction);
                Transition::Idle
            }
            GameEvent::Commit => self.commit(prompt),
            GameEvent::Cancel => self.cancel(),
            GameEvent::Click(square) => {
                self.selection.set_cursor(square);
                self.commit(prompt)
            }
        }
    }

    /// Select the piece under the cursor, or try to move the selected piece there
    pub fn commit(&mut self, prompt: &mut dyn PromotionPrompt) -> Transition {
        let cursor = self.selection.cursor();
        match self.selection.state() {
            SelectionState::Idle => {
                if self.selection.arm(&self.board, self.current_player) {
                    debug!(square = %cursor, "piece selected");
                    Transition::Armed
                } else {
                    Transition::Idle
                }
            }
            SelectionState::Armed { from, .. } if from == cursor => {
                self.selection.disarm();
                Transition::Cancelled
            }
            SelectionState::Armed { from, piece } => {
                match self.apply(from, piece, cursor, prompt) {
                    Ok(record) => Transition::Moved(record),
                    Err(e) => Transition::Rejected(e),
                }
            }
        }
    }

    pub fn cancel(&mut self) -> Transition {
        if !self.selection.is_selected() {
            return Transition::Idle;
        }
        self.selection.disarm();
        Transition::Cancelled
    }

    fn apply(
        &mut self,
        from: Coord,
        piece: Piece,
        to: Coord,
        prompt: &mut dyn PromotionPrompt,
    ) -> Result<MoveRecord, MoveError> {
        if from == to {
            return Err(MoveError::SelfMove);
        }
        if self.authority.outcome().is_over() {
            return Err(MoveError::GameOver);
        }
        let color = piece.color().ok_or(MoveError::EmptySource(from))?;
        if self.board.get(to).belongs_to(color) {
            debug!(square = %to, "destination holds own piece");
            return Err(MoveError::OwnPieceCapture(to));
        }

        let is_pawn = piece.is_kind(PieceKind::Pawn);
        let en_passant_victim =
            (is_pawn && self.en_passant == Some(to)).then(|| Coord::new(from.row, to.col));

        let promotion = if is_pawn && to.row == color.promotion_row() {
            let choice = prompt.choose(color);
            if choice.is_none() {
                debug!("promotion prompt dismissed, submitting without a piece");
            }
            choice
        } else {
            None
        };

        let uci = to_uci_move(from, to, promotion)
            .ok_or_else(|| NotationError::OutOfBounds(format!("{from}{to}")))?;

        let legal_before = self.authority.legal_moves();
        if let Err(reason) = self.authority.play_uci(&uci) {
            warn!(%uci, %reason, "move rejected");
            return Err(MoveError::Rejected { uci, reason });
        }

        let capture = !self.board.get(to).is_empty() || en_passant_victim.is_some();
        let san = san::to_algebraic(&MoveContext {
            from,
            to,
            piece,
            capture,
            promotion,
            board: &self.board,
            legal_moves: &legal_before,
            outcome: self.authority.outcome(),
            check: self.authority.is_check(),
        });

        self.mirror(from, to, piece, color, promotion, en_passant_victim);

        self.en_passant = None;
        if is_pawn && from.row == color.pawn_row() && from.row.abs_diff(to.row) == 2 {
            self.en_passant = Some(Coord::new((from.row + to.row) / 2, from.col));
        }

        self.history.push(&san);
        self.current_player = self.current_player.opponent();
        self.selection.disarm();

        info!(%uci, %san, "move played");
        Ok(MoveRecord { uci, san })
    }

    /// Bring the visual board in line with an accepted move
    fn mirror(
        &mut self,
        from: Coord,
        to: Coord,
        piece: Piece,
        color: PieceColor,
        promotion: Option<Promotion>,
        en_passant_victim: Option<Coord>,
    ) {
        if piece.is_kind(PieceKind::King) {
            if let Some(king_side) = san::castling_side(from, to) {
                let row = from.row;
                let (rook_from, rook_to) = if king_side {
                    (Coord::new(row, 7), Coord::new(row, 5))
                } else {
                    (Coord::new(row, 0), Coord::new(row, 3))
                };
                if self.board.get(rook_from) != Piece::new(PieceKind::Rook, color) {
                    warn!(rook = %rook_from, "castling rook missing, board left unchanged");
                    return;
                }
                self.board.relocate(from, to);
                self.board.relocate(rook_from, rook_to);
                return;
            }
        }

        if let Some(victim) = en_passant_victim {
            self.board.set(victim, Piece::Empty);
        }
        self.board.relocate(from, to);
        if let Some(promotion) = promotion {
            self.board.set(to, Piece::new(promotion.kind(), color));
        }
    }
}
