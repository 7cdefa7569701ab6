//! Move history ledger - numbered, two-column move list.

use serde::{Deserialize, Serialize};

/// Append-only record of played moves in algebraic notation.
///
/// The text form matches what the move panel shows: each white move opens a
/// new line `"\n<n>. <move>"` and each black move is appended as `" <move>"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    ply: usize,
    text: String,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, san: &str) {
        self.ply += 1;
        let move_number = (self.ply + 1) / 2;
        if self.ply % 2 == 1 {
            self.text.push_str(&format!("\n{move_number}. {san}"));
        } else {
            self.text.push_str(&format!(" {san}"));
        }
    }

    /// Half-moves recorded so far
    pub fn ply(&self) -> usize {
        self.ply
    }

    pub fn is_empty(&self) -> bool {
        self.ply == 0
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        history.push("e4");
        assert!(!history.is_empty());
        assert_eq!(history.text(), "\n1. e4");
        assert_eq!(history.ply(), 1);
    }

    #[test]
    fn test_black_move_joins_line() {
        let mut history = MoveHistory::new();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bb5"] {
            history.push(san);
        }
        assert_eq!(history.text(), "\n1. e4 e5\n2. Nf3 Nc6\n3. Bb5");
        assert_eq!(history.ply(), 5);
    }
}
