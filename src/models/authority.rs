//! Rule authority - the single source of truth for chess legality.
//!
//! The visual board only ever changes after the authority has accepted a
//! move. `ShakmatyAuthority` is the production implementation.

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{
    Bitboard, CastlingMode, Chess, Color as SColor, EnPassantMode, KnownOutcome, Outcome, Position,
    Square,
};
use thiserror::Error;

use crate::domain::{Coord, GameOutcome, LegalMove};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorityError {
    #[error("malformed move {0:?}")]
    Parse(String),
    #[error("illegal move {0:?}")]
    Illegal(String),
    #[error("invalid position {0:?}")]
    InvalidFen(String),
}

pub trait RuleAuthority {
    /// Validate and commit a coordinate move such as `e2e4` or `e7e8q`
    fn play_uci(&mut self, uci: &str) -> Result<(), AuthorityError>;

    /// Legal moves for the side to move
    fn legal_moves(&self) -> Vec<LegalMove>;

    fn outcome(&self) -> GameOutcome;

    /// Whether the side to move is in check
    fn is_check(&self) -> bool;

    /// Starting FEN, `None` for the standard start position
    fn start_fen(&self) -> Option<&str>;

    /// Every accepted move so far, in UCI form
    fn moves_played(&self) -> &[String];
}

/// Occurrences of one position that end the game in a draw
const REPETITION_LIMIT: usize = 5;
/// Plies without a capture or pawn move that end the game in a draw
const QUIET_PLY_LIMIT: u32 = 150;

/// The parts of a position that decide whether it repeats
#[derive(Clone, PartialEq, Eq)]
struct PositionKey {
    board: shakmaty::Board,
    turn: SColor,
    castling: Bitboard,
    ep_square: Option<Square>,
}

impl PositionKey {
    fn of(position: &Chess) -> Self {
        Self {
            board: position.board().clone(),
            turn: position.turn(),
            castling: position.castles().castling_rights(),
            ep_square: position.ep_square(EnPassantMode::Legal),
        }
    }
}

pub struct ShakmatyAuthority {
    position: Chess,
    start_fen: Option<String>,
    moves: Vec<String>,
    /// Every position reached, the start included
    seen: Vec<PositionKey>,
}

impl ShakmatyAuthority {
    pub fn new() -> Self {
        Self::with_position(Chess::default(), None)
    }

    /// Build from an already parsed FEN, `text` being its original form
    pub fn from_parsed(text: &str, fen: Fen) -> Result<Self, AuthorityError> {
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|_| AuthorityError::InvalidFen(text.to_string()))?;
        Ok(Self::with_position(position, Some(text.to_string())))
    }

    fn with_position(position: Chess, start_fen: Option<String>) -> Self {
        let seen = vec![PositionKey::of(&position)];
        Self {
            position,
            start_fen,
            moves: Vec::new(),
            seen,
        }
    }

    /// How often the current position has occurred
    fn repetitions(&self) -> usize {
        let current = PositionKey::of(&self.position);
        self.seen.iter().filter(|key| **key == current).count()
    }
}

impl Default for ShakmatyAuthority {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleAuthority for ShakmatyAuthority {
    fn play_uci(&mut self, uci: &str) -> Result<(), AuthorityError> {
        let parsed: UciMove = uci
            .parse()
            .map_err(|_| AuthorityError::Parse(uci.to_string()))?;
        let m = parsed
            .to_move(&self.position)
            .map_err(|_| AuthorityError::Illegal(uci.to_string()))?;
        let next = self
            .position
            .clone()
            .play(m)
            .map_err(|_| AuthorityError::Illegal(uci.to_string()))?;

        self.position = next;
        self.moves.push(uci.to_string());
        self.seen.push(PositionKey::of(&self.position));
        Ok(())
    }

    fn legal_moves(&self) -> Vec<LegalMove> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| {
                // Castling comes back as the king's two-square hop, e.g. e1g1
                let uci = m.to_uci(CastlingMode::Standard);
                let UciMove::Normal { from, to, .. } = uci else {
                    return None;
                };
                Some(LegalMove {
                    from: Coord::parse(&from.to_string()).ok()?,
                    to: Coord::parse(&to.to_string()).ok()?,
                    uci: uci.to_string(),
                })
            })
            .collect()
    }

    fn outcome(&self) -> GameOutcome {
        match self.position.outcome() {
            Outcome::Known(KnownOutcome::Decisive { winner }) => match winner {
                SColor::White => GameOutcome::WhiteWon,
                SColor::Black => GameOutcome::BlackWon,
            },
            Outcome::Known(KnownOutcome::Draw) => GameOutcome::Draw,
            Outcome::Unknown if self.repetitions() >= REPETITION_LIMIT
                || self.position.halfmoves() >= QUIET_PLY_LIMIT =>
            {
                GameOutcome::Draw
            }
            Outcome::Unknown => GameOutcome::Ongoing,
        }
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn start_fen(&self) -> Option<&str> {
        self.start_fen.as_deref()
    }

    fn moves_played(&self) -> &[String] {
        &self.moves
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn authority(fen: &str) -> ShakmatyAuthority {
        ShakmatyAuthority::from_parsed(fen, fen.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let authority = ShakmatyAuthority::new();
        let moves = authority.legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().any(|m| m.uci == "e2e4"
            && m.from == Coord::new(6, 4)
            && m.to == Coord::new(4, 4)));
    }

    #[test]
    fn test_accepts_legal_and_rejects_illegal() {
        let mut authority = ShakmatyAuthority::new();
        assert_eq!(
            authority.play_uci("e2e5"),
            Err(AuthorityError::Illegal("e2e5".to_string()))
        );
        assert_eq!(
            authority.play_uci("zz"),
            Err(AuthorityError::Parse("zz".to_string()))
        );
        assert!(authority.moves_played().is_empty());

        authority.play_uci("e2e4").unwrap();
        assert_eq!(authority.moves_played(), ["e2e4".to_string()]);
        // black to move now, white moves are illegal
        assert!(authority.play_uci("d2d4").is_err());
    }

    #[test]
    fn test_castling_listed_as_king_hop() {
        let authority = authority("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let ucis: Vec<String> = authority.legal_moves().into_iter().map(|m| m.uci).collect();
        assert!(ucis.contains(&"e1g1".to_string()));
        assert!(ucis.contains(&"e1c1".to_string()));
    }

    #[test]
    fn test_castling_accepted_as_king_hop() {
        let mut authority = authority("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        authority.play_uci("e1g1").unwrap();
        assert_eq!(authority.start_fen(), Some("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"));
    }

    #[test]
    fn test_promotion_needs_suffix() {
        let mut authority = authority("7k/4P3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(authority.play_uci("e7e8").is_err());
        authority.play_uci("e7e8q").unwrap();
        assert!(authority.is_check());
    }

    #[test]
    fn test_fools_mate_outcome() {
        let mut authority = ShakmatyAuthority::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            authority.play_uci(uci).unwrap();
        }
        assert!(authority.is_check());
        assert_eq!(authority.outcome(), GameOutcome::BlackWon);
        assert!(authority.legal_moves().is_empty());
    }

    #[test]
    fn test_stalemate_is_draw() {
        let mut authority = authority("k7/8/8/8/8/8/5Q2/K7 w - - 0 1");
        authority.play_uci("f2b6").unwrap();
        assert_eq!(authority.outcome(), GameOutcome::Draw);
        assert!(!authority.is_check());
    }

    #[test]
    fn test_fivefold_repetition_is_draw() {
        let mut authority = ShakmatyAuthority::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for _ in 0..3 {
            for uci in shuffle {
                authority.play_uci(uci).unwrap();
            }
        }
        // start position seen four times
        assert_eq!(authority.outcome(), GameOutcome::Ongoing);

        for uci in shuffle {
            authority.play_uci(uci).unwrap();
        }
        assert_eq!(authority.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn test_seventy_five_move_rule_is_draw() {
        let mut authority = authority("4k3/8/8/8/8/8/8/R3K3 w - - 148 80");
        authority.play_uci("a1a2").unwrap();
        assert_eq!(authority.outcome(), GameOutcome::Ongoing);
        authority.play_uci("e8d8").unwrap();
        assert_eq!(authority.outcome(), GameOutcome::Draw);
    }

    #[test]
    fn test_pawn_move_resets_quiet_plies() {
        let mut authority = authority("4k3/8/8/8/8/8/P7/4K2R w - - 149 80");
        authority.play_uci("a2a3").unwrap();
        assert_eq!(authority.outcome(), GameOutcome::Ongoing);
    }

    #[test]
    fn test_invalid_fen() {
        let kingless = "8/8/8/8/8/8/8/8 w - - 0 1";
        assert!(matches!(
            ShakmatyAuthority::from_parsed(kingless, kingless.parse().unwrap()),
            Err(AuthorityError::InvalidFen(_))
        ));
    }
}
