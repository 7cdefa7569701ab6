//! UCI (Universal Chess Interface) protocol types and utilities.
//!
//! This module only formats commands and classifies engine output. Spawning
//! and talking to the engine process lives in the models layer.

/// UCI commands that can be sent to an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// Set position (startpos or FEN, with optional moves)
    Position { fen: Option<String>, moves: Vec<String> },
    /// Search for a fixed time in milliseconds
    GoMoveTime(u64),
    Quit,
}

impl UciCommand {
    /// Convert command to UCI protocol string
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::UciNewGame => "ucinewgame".to_string(),
            UciCommand::Position { fen, moves } => {
                let mut cmd = match fen {
                    Some(f) => format!("position fen {f}"),
                    None => "position startpos".to_string(),
                };
                if !moves.is_empty() {
                    cmd.push_str(" moves ");
                    cmd.push_str(&moves.join(" "));
                }
                cmd
            }
            UciCommand::GoMoveTime(ms) => format!("go movetime {ms}"),
            UciCommand::Quit => "quit".to_string(),
        }
    }
}

/// Raw UCI output line, categorized by its leading token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOutputKind {
    UciOk,
    ReadyOk,
    /// "info ..." - analysis information
    Info(String),
    /// "bestmove ..." - end of a search
    BestMove(String),
    /// id, option and anything else the app does not use
    Other,
}

impl UciOutputKind {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line == "uciok" {
            UciOutputKind::UciOk
        } else if line == "readyok" {
            UciOutputKind::ReadyOk
        } else if let Some(rest) = line.strip_prefix("info ") {
            UciOutputKind::Info(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("bestmove") {
            UciOutputKind::BestMove(rest.trim().to_string())
        } else {
            UciOutputKind::Other
        }
    }
}

/// The reply that ends a search: `bestmove <move> [ponder <move>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMove {
    /// `None` when the engine has no move (`bestmove (none)`)
    pub best: Option<String>,
    pub ponder: Option<String>,
}

impl BestMove {
    /// Parse the part after "bestmove"
    pub fn parse(rest: &str) -> Option<Self> {
        let mut tokens = rest.split_whitespace();
        let best = tokens.next()?;
        let ponder = match (tokens.next(), tokens.next()) {
            (Some("ponder"), Some(mv)) => Some(mv.to_string()),
            _ => None,
        };
        let best = (best != "(none)").then(|| best.to_string());
        Some(Self { best, ponder })
    }
}

/// Engine evaluation score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn score from the side to move's point of view
    Centipawns(i32),
    /// Mate in N moves (negative = side to move gets mated)
    Mate(i32),
}

impl Score {
    /// Format score for display (e.g., "+0.35" or "M3" or "-M2")
    pub fn display(&self) -> String {
        match self {
            Score::Centipawns(cp) => {
                let pawns = *cp as f64 / 100.0;
                if pawns >= 0.0 {
                    format!("+{:.2}", pawns)
                } else {
                    format!("{:.2}", pawns)
                }
            }
            Score::Mate(moves) if *moves > 0 => format!("M{}", moves),
            Score::Mate(moves) => format!("-M{}", moves.abs()),
        }
    }
}

/// Parsed UCI info line, only the fields the footer shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UciInfo {
    pub depth: Option<u32>,
    pub score: Option<Score>,
    /// Principal variation as UCI moves
    pub pv: Vec<String>,
}

impl UciInfo {
    /// Parse a UCI info string (the part after "info ")
    pub fn parse(info_str: &str) -> Self {
        let mut info = UciInfo::default();
        let mut tokens = info_str.split_whitespace();

        while let Some(token) = tokens.next() {
            match token {
                "depth" => info.depth = tokens.next().and_then(|t| t.parse().ok()),
                "score" => {
                    let kind = tokens.next();
                    let value = tokens.next().and_then(|t| t.parse::<i32>().ok());
                    info.score = match (kind, value) {
                        (Some("cp"), Some(cp)) => Some(Score::Centipawns(cp)),
                        (Some("mate"), Some(m)) => Some(Score::Mate(m)),
                        _ => info.score,
                    };
                }
                // pv runs to the end of the line
                "pv" => info.pv = tokens.by_ref().map(str::to_string).collect(),
                // free text runs to the end of the line and may contain keywords
                "string" => break,
                _ => {}
            }
        }

        info
    }

    /// Depth and score are both present
    pub fn has_evaluation(&self) -> bool {
        self.depth.is_some() && self.score.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_startpos() {
        let cmd = UciCommand::Position { fen: None, moves: vec![] };
        assert_eq!(cmd.to_uci_string(), "position startpos");
    }

    #[test]
    fn test_position_with_moves() {
        let cmd = UciCommand::Position {
            fen: None,
            moves: vec!["e2e4".to_string(), "e7e5".to_string()],
        };
        assert_eq!(cmd.to_uci_string(), "position startpos moves e2e4 e7e5");
    }

    #[test]
    fn test_position_fen_with_moves() {
        let cmd = UciCommand::Position {
            fen: Some("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".to_string()),
            moves: vec!["e1g1".to_string()],
        };
        assert_eq!(
            cmd.to_uci_string(),
            "position fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1 moves e1g1"
        );
    }

    #[test]
    fn test_go_movetime() {
        assert_eq!(UciCommand::GoMoveTime(10).to_uci_string(), "go movetime 10");
    }

    #[test]
    fn test_classify_output() {
        assert_eq!(UciOutputKind::parse("readyok"), UciOutputKind::ReadyOk);
        assert_eq!(UciOutputKind::parse("uciok\n"), UciOutputKind::UciOk);
        assert!(matches!(
            UciOutputKind::parse("info depth 20 score cp 35 pv e2e4 e7e5"),
            UciOutputKind::Info(_)
        ));
        assert_eq!(
            UciOutputKind::parse("bestmove e2e4 ponder e7e5"),
            UciOutputKind::BestMove("e2e4 ponder e7e5".to_string())
        );
        assert_eq!(
            UciOutputKind::parse("id name Stockfish 16"),
            UciOutputKind::Other
        );
    }

    #[test]
    fn test_parse_bestmove_with_ponder() {
        let best = BestMove::parse("e2e4 ponder e7e5").unwrap();
        assert_eq!(best.best.as_deref(), Some("e2e4"));
        assert_eq!(best.ponder.as_deref(), Some("e7e5"));
    }

    #[test]
    fn test_parse_bestmove_without_ponder() {
        let best = BestMove::parse("g1f3").unwrap();
        assert_eq!(best.best.as_deref(), Some("g1f3"));
        assert_eq!(best.ponder, None);
    }

    #[test]
    fn test_parse_bestmove_none() {
        let best = BestMove::parse("(none)").unwrap();
        assert_eq!(best.best, None);
        assert_eq!(BestMove::parse(""), None);
    }

    #[test]
    fn test_parse_uci_info_basic() {
        let info =
            UciInfo::parse("depth 20 score cp 35 nodes 1234567 nps 2500000 pv e2e4 e7e5 g1f3");
        assert_eq!(info.depth, Some(20));
        assert_eq!(info.score, Some(Score::Centipawns(35)));
        assert_eq!(info.pv, vec!["e2e4", "e7e5", "g1f3"]);
        assert!(info.has_evaluation());
    }

    #[test]
    fn test_parse_uci_info_mate_score() {
        let info = UciInfo::parse("depth 15 score mate -2 pv g8f6");
        assert_eq!(info.score, Some(Score::Mate(-2)));
    }

    #[test]
    fn test_parse_uci_info_without_score() {
        let info = UciInfo::parse("depth 15 currmove g1f3 currmovenumber 5");
        assert_eq!(info.depth, Some(15));
        assert!(info.pv.is_empty());
        assert!(!info.has_evaluation());
    }

    #[test]
    fn test_parse_uci_info_string() {
        let info = UciInfo::parse("string NNUE evaluation using nn.nnue depth 3");
        assert_eq!(info, UciInfo::default());
    }

    #[test]
    fn test_parse_stockfish_real_output() {
        let info = UciInfo::parse(
            "depth 24 seldepth 31 multipv 1 score cp 28 nodes 2847613 nps 2431482 hashfull 457 \
             time 1171 pv e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1",
        );
        assert_eq!(info.depth, Some(24));
        assert_eq!(info.score, Some(Score::Centipawns(28)));
        assert_eq!(info.pv.len(), 9);
        assert_eq!(info.pv[0], "e2e4");
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::Centipawns(35).display(), "+0.35");
        assert_eq!(Score::Centipawns(-125).display(), "-1.25");
        assert_eq!(Score::Centipawns(0).display(), "+0.00");
        assert_eq!(Score::Mate(3).display(), "M3");
        assert_eq!(Score::Mate(-2).display(), "-M2");
    }
}
