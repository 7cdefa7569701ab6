//! Engine model - manages the UCI engine process and move suggestions.
//!
//! Architecture:
//! - Engine I/O runs on OS threads (reader/writer)
//! - The model talks to them over channels and blocks with a timeout while
//!   waiting for a reply, so a hung engine never freezes the board

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::uci::{BestMove, UciCommand, UciInfo, UciOutputKind};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("engine {0} pipe unavailable")]
    Pipe(&'static str),
    #[error("engine did not answer {0} in time")]
    Timeout(&'static str),
    #[error("engine exited")]
    Exited,
    #[error("unexpected engine reply: {0}")]
    Protocol(String),
}

/// Messages sent from the engine reader thread to the model
#[derive(Debug)]
enum EngineEvent {
    /// A line of output from the engine
    Output(String),
    /// Engine process exited
    Exited,
    Error(String),
}

/// Best move for the side to move, as the footer shows it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestion {
    pub best: Option<String>,
    pub ponder: Option<String>,
    /// Last evaluated info line of the search
    pub info: Option<UciInfo>,
}

impl Suggestion {
    pub fn summary(&self) -> String {
        format!(
            "Best Move: {}, Ponder: {}",
            self.best.as_deref().unwrap_or("-"),
            self.ponder.as_deref().unwrap_or("-")
        )
    }
}

/// Something that can suggest a move for a position
pub trait SearchEngine {
    /// `start_fen` of `None` means the standard starting position
    fn suggest(
        &mut self,
        start_fen: Option<&str>,
        moves: &[String],
    ) -> Result<Suggestion, EngineError>;
}

/// Engine limits
#[derive(Debug, Clone, Copy)]
pub struct EngineLimits {
    /// Search time per suggestion
    pub think_time: Duration,
    /// Longest wait for any single reply
    pub timeout: Duration,
}

/// A running UCI engine process
pub struct UciEngine {
    limits: EngineLimits,
    running: bool,
    /// Channel receiver for engine events
    event_receiver: Receiver<EngineEvent>,
    /// Channel sender for commands to engine writer thread
    command_sender: Sender<String>,
    process: Child,
}

impl UciEngine {
    /// Start the engine binary at `path` and run the UCI handshake
    pub fn start(path: &str, limits: EngineLimits) -> Result<Self, EngineError> {
        Self::spawn(Command::new(path), limits)
    }

    pub fn spawn(mut command: Command, limits: EngineLimits) -> Result<Self, EngineError> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(EngineError::Pipe("stdin"))?;
        let stdout = child.stdout.take().ok_or(EngineError::Pipe("stdout"))?;

        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let (cmd_tx, cmd_rx) = mpsc::channel::<String>();

        // Reader thread
        thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(text) => {
                        if event_tx.send(EngineEvent::Output(text)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = event_tx.send(EngineEvent::Error(e.to_string()));
                        break;
                    }
                }
            }
            let _ = event_tx.send(EngineEvent::Exited);
        });

        // Writer thread
        thread::spawn(move || {
            let mut writer = stdin;
            while let Ok(cmd) = cmd_rx.recv() {
                if writeln!(writer, "{}", cmd).is_err() {
                    break;
                }
                if writer.flush().is_err() {
                    break;
                }
            }
        });

        let mut engine = Self {
            limits,
            running: true,
            event_receiver: event_rx,
            command_sender: cmd_tx,
            process: child,
        };

        engine.send_command(UciCommand::Uci);
        engine.wait_for("uci", |kind| matches!(kind, UciOutputKind::UciOk).then_some(()))?;
        engine.sync()?;
        engine.send_command(UciCommand::UciNewGame);
        info!("engine started");

        Ok(engine)
    }

    /// Round trip isready/readyok, dropping anything the engine said before
    fn sync(&mut self) -> Result<(), EngineError> {
        self.send_command(UciCommand::IsReady);
        self.wait_for("isready", |kind| {
            matches!(kind, UciOutputKind::ReadyOk).then_some(())
        })
    }

    /// Read output until `accept` returns a value
    fn wait_for<T>(
        &mut self,
        what: &'static str,
        mut accept: impl FnMut(UciOutputKind) -> Option<T>,
    ) -> Result<T, EngineError> {
        let deadline = Instant::now() + self.limits.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let event = match self.event_receiver.recv_timeout(remaining) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => return Err(EngineError::Timeout(what)),
                Err(RecvTimeoutError::Disconnected) => {
                    self.running = false;
                    return Err(EngineError::Exited);
                }
            };
            match event {
                EngineEvent::Output(line) => {
                    if let Some(value) = accept(UciOutputKind::parse(&line)) {
                        return Ok(value);
                    }
                }
                EngineEvent::Exited => {
                    self.running = false;
                    return Err(EngineError::Exited);
                }
                EngineEvent::Error(e) => warn!(error = %e, "engine read failed"),
            }
        }
    }

    /// Send a UCI command to the engine
    fn send_command(&self, cmd: UciCommand) {
        let cmd_str = cmd.to_uci_string();
        debug!(command = %cmd_str, "to engine");
        let _ = self.command_sender.send(cmd_str);
    }
}

impl SearchEngine for UciEngine {
    fn suggest(
        &mut self,
        start_fen: Option<&str>,
        moves: &[String],
    ) -> Result<Suggestion, EngineError> {
        if !self.running {
            return Err(EngineError::Exited);
        }
        self.sync()?;

        self.send_command(UciCommand::Position {
            fen: start_fen.map(str::to_string),
            moves: moves.to_vec(),
        });
        self.send_command(UciCommand::GoMoveTime(self.limits.think_time.as_millis() as u64));

        let mut last_info: Option<UciInfo> = None;
        let best = self.wait_for("go", |kind| match kind {
            UciOutputKind::Info(text) => {
                let info = UciInfo::parse(&text);
                if info.has_evaluation() {
                    last_info = Some(info);
                }
                None
            }
            UciOutputKind::BestMove(rest) => Some(BestMove::parse(&rest).ok_or(rest)),
            _ => None,
        })?;
        let best = best.map_err(EngineError::Protocol)?;

        debug!(best = ?best.best, ponder = ?best.ponder, "engine suggestion");
        Ok(Suggestion {
            best: best.best,
            ponder: best.ponder,
            info: last_info,
        })
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        if self.running {
            self.send_command(UciCommand::Quit);
        }
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::uci::Score;

    const FAKE_ENGINE: &str = r#"
while read line; do
  case "$line" in
    uci) echo "id name Fake"; echo "uciok" ;;
    isready) echo "readyok" ;;
    go*) echo "info depth 3 score cp 21 pv e2e4 e7e5"; echo "bestmove e2e4 ponder e7e5" ;;
    quit) exit 0 ;;
  esac
done
"#;

    const SILENT_SEARCH: &str = r#"
while read line; do
  case "$line" in
    uci) echo "uciok" ;;
    isready) echo "readyok" ;;
    quit) exit 0 ;;
  esac
done
"#;

    fn limits() -> EngineLimits {
        EngineLimits {
            think_time: Duration::from_millis(10),
            timeout: Duration::from_millis(500),
        }
    }

    fn fake(script: &str) -> Result<UciEngine, EngineError> {
        let mut command = Command::new("sh");
        command.arg("-c").arg(script);
        UciEngine::spawn(command, limits())
    }

    #[test]
    fn test_suggestion_summary() {
        let suggestion = Suggestion {
            best: Some("g1f3".to_string()),
            ponder: None,
            info: None,
        };
        assert_eq!(suggestion.summary(), "Best Move: g1f3, Ponder: -");
    }

    #[test]
    fn test_missing_binary() {
        let result = UciEngine::start("/nonexistent/stockfish", limits());
        assert!(matches!(result, Err(EngineError::Spawn(_))));
    }

    #[test]
    fn test_suggest_from_fake_engine() {
        let mut engine = fake(FAKE_ENGINE).unwrap();
        let suggestion = engine.suggest(None, &[]).unwrap();
        assert_eq!(suggestion.best.as_deref(), Some("e2e4"));
        assert_eq!(suggestion.ponder.as_deref(), Some("e7e5"));
        assert_eq!(
            suggestion.info.and_then(|info| info.score),
            Some(Score::Centipawns(21))
        );

        // a second query on the same process
        let again = engine.suggest(None, &["e2e4".to_string()]).unwrap();
        assert_eq!(again.summary(), "Best Move: e2e4, Ponder: e7e5");
    }

    #[test]
    fn test_search_timeout() {
        let mut engine = fake(SILENT_SEARCH).unwrap();
        assert!(matches!(
            engine.suggest(None, &[]),
            Err(EngineError::Timeout("go"))
        ));
    }

    #[test]
    fn test_engine_that_exits() {
        let result = fake("exit 0");
        assert!(matches!(result, Err(EngineError::Exited)));
    }
}
