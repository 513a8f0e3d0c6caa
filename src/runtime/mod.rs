use std::io;

use clap::Parser;
use tracing::{debug, error, warn};

use crate::app::Explorer;
use crate::store::StateStore;

mod cli;
mod commands;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::Args::parse();
    let (settings, problem) = settings::load_settings();

    logging::init(&settings.logging);
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    let state_path = args
        .state
        .clone()
        .or_else(|| settings.state_path())
        .ok_or("no state path: set library.state_path, XDG_DATA_HOME or HOME")?;
    let store = StateStore::new(state_path);
    debug!(state = %store.path().display(), "using state file");

    let mut explorer = Explorer::new(store.load(), &settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mutated = commands::execute(&args.command, &mut explorer, &mut out)?;

    if mutated {
        // A failed save is reported but the command itself already succeeded.
        if let Err(e) = store.save(explorer.index()) {
            error!(error = %e, "failed to save library state");
            eprintln!("audioshelf: {e}");
        }
    }

    Ok(())
}
