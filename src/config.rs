//! Command-line options and the optional JSON configuration file.
//!
//! Values given on the command line win over the file, the file wins over
//! the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::EngineLimits;

#[derive(Parser, Debug, Default)]
#[command(name = "term-chess", version, about = "Play chess in the terminal")]
pub struct Cli {
    /// Search engine executable
    #[arg(long, value_name = "PATH")]
    pub engine: Option<String>,

    /// Run without move suggestions
    #[arg(long)]
    pub no_engine: bool,

    /// Engine thinking time per suggestion
    #[arg(long, value_name = "MS")]
    pub think_ms: Option<u64>,

    /// Longest wait for a single engine reply
    #[arg(long, value_name = "MS")]
    pub engine_timeout_ms: Option<u64>,

    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `term_chess=trace`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Start from this position instead of the initial one
    #[arg(long)]
    pub fen: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the JSON Schema of the configuration file and exit
    #[arg(long)]
    pub print_config_schema: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Search engine executable
    pub engine_path: String,
    pub engine_enabled: bool,
    /// Engine thinking time per suggestion, in milliseconds
    pub think_ms: u64,
    /// Longest wait for a single engine reply, in milliseconds
    pub engine_timeout_ms: u64,
    pub log_file: PathBuf,
    /// Falls back to `RUST_LOG`, then `info`
    pub log_level: Option<String>,
    /// Custom start position
    pub start_fen: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_path: "stockfish".to_string(),
            engine_enabled: true,
            think_ms: 10,
            engine_timeout_ms: 2000,
            log_file: PathBuf::from(".log/chess.log"),
            log_level: None,
            start_fen: None,
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge(cli))
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn schema_json() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }

    /// Apply command-line overrides
    pub fn merge(mut self, cli: &Cli) -> Self {
        if let Some(engine) = &cli.engine {
            self.engine_path = engine.clone();
        }
        if cli.no_engine {
            self.engine_enabled = false;
        }
        if let Some(ms) = cli.think_ms {
            self.think_ms = ms;
        }
        if let Some(ms) = cli.engine_timeout_ms {
            self.engine_timeout_ms = ms;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        if cli.log_level.is_some() {
            self.log_level = cli.log_level.clone();
        }
        if cli.fen.is_some() {
            self.start_fen = cli.fen.clone();
        }
        self
    }

    pub fn engine_limits(&self) -> EngineLimits {
        EngineLimits {
            think_time: Duration::from_millis(self.think_ms),
            timeout: Duration::from_millis(self.engine_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(&Cli::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine_path, "stockfish");
        assert_eq!(config.engine_limits().think_time, Duration::from_millis(10));
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "term-chess",
            "--engine",
            "/usr/games/stockfish",
            "--think-ms",
            "50",
            "--no-engine",
            "--fen",
            "8/8/8/8/8/8/8/K6k w - - 0 1",
        ]);
        let config = Config::default().merge(&cli);
        assert_eq!(config.engine_path, "/usr/games/stockfish");
        assert_eq!(config.think_ms, 50);
        assert!(!config.engine_enabled);
        assert_eq!(config.start_fen.as_deref(), Some("8/8/8/8/8/8/8/K6k w - - 0 1"));
        assert_eq!(config.engine_timeout_ms, 2000);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "think_ms": 100, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.think_ms, 100);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.engine_path, "stockfish");
        assert!(config.engine_enabled);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = Config::from_json(r#"{ "think_ms": 100, "engine_path": "sf" }"#).unwrap();
        let cli = Cli::parse_from(["term-chess", "--think-ms", "5"]);
        let config = file.merge(&cli);
        assert_eq!(config.think_ms, 5);
        assert_eq!(config.engine_path, "sf");
    }

    #[test]
    fn test_bad_json() {
        assert!(Config::from_json("{ think_ms: }").is_err());
        assert!(Config::from_json(r#"{ "think_ms": "fast" }"#).is_err());
    }

    #[test]
    fn test_schema_lists_fields() {
        let schema = Config::schema_json().unwrap();
        assert!(schema.contains("think_ms"));
        assert!(schema.contains("engine_path"));
    }
}
