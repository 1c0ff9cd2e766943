//! Binary entry point: resolve configuration, start file logging, load the
//! people list, and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use clap::Parser;
use people_manager::config::{AppConfig, Cli};
use people_manager::logging::init_logging;
use people_manager::{run_app, App, RecordStore};

/// Returning a `Result` bubbles up fatal startup problems (no home directory,
/// an unusable log directory) to the terminal instead of crashing silently.
/// Data file problems are not fatal; they show up in the status bar.
fn main() -> anyhow::Result<()> {
    let config = AppConfig::resolve(Cli::parse()).context("failed to resolve configuration")?;
    let _logger = init_logging(&config.log_level, &config.log_dir)?;

    let (store, load_error) = RecordStore::open(&config.data_file);
    let mut app = App::new(store, config.viewer, load_error);
    run_app(&mut app)
}
