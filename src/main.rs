mod app;
mod config;
mod domain;
mod logging;
mod models;
mod ui;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crate::app::App;
use crate::config::{Cli, Config};
use crate::models::{GameModel, SearchEngine, UciEngine};
use crate::ui::Theme;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.print_config_schema {
        println!("{}", Config::schema_json()?);
        return Ok(());
    }

    let config = Config::load(&cli)?;
    logging::init(&config)?;

    let game = match &config.start_fen {
        Some(fen) => GameModel::from_fen(fen)
            .with_context(|| format!("bad start position {fen:?}"))?,
        None => GameModel::new(),
    };

    let engine: Option<Box<dyn SearchEngine>> = if config.engine_enabled {
        match UciEngine::start(&config.engine_path, config.engine_limits()) {
            Ok(engine) => Some(Box::new(engine)),
            Err(e) => {
                warn!(engine = %config.engine_path, error = %e, "running without engine");
                None
            }
        }
    } else {
        info!("engine disabled");
        None
    };

    App::new(game, engine, Theme::default()).run()
}
