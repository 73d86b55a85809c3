use std::path::PathBuf;

use blockfall_engine::{GameSession, PieceSeed};
use ratatui_runtime::Runtime;

use crate::{command::play::app::PlayApp, config::GameArgs, logging};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArgs,
    /// Seed for the piece sequence (32 hex digits); random if omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Show clickable arrow buttons next to the board
    #[clap(long)]
    keypad: bool,
    /// Write logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game,
        seed,
        keypad,
        log_file,
    } = arg;

    logging::init(log_file.as_deref())?;
    let config = game.load()?;
    let session = match seed {
        Some(seed) => GameSession::with_seed(config, *seed)?,
        None => GameSession::new(config)?,
    };
    log::info!("starting game with seed {}", session.seed());

    let mut app = PlayApp::new(session, *keypad);
    Runtime::new().run(&mut app)?;

    log::info!("game finished with score {}", app.session().score());
    Ok(())
}
