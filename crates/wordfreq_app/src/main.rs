mod config;
mod console;
mod logging;

use std::io;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use wordfreq_core::AppState;
use wordfreq_engine::WordCountEngine;

fn main() -> anyhow::Result<()> {
    let path = config::config_path();
    let (config, config_error) = match config::read_config(&path) {
        Ok(config) => (config, None),
        Err(err) => (config::AppConfig::default(), Some(err)),
    };

    logging::initialize(config.log_destination, config.log_level.into());
    if let Some(err) = config_error {
        engine_warn!("{}; using defaults", err);
    }
    engine_info!("starting with top_k={} config={:?}", config.top_k, path);

    let engine =
        WordCountEngine::new(config.fetch_settings()).context("starting word count engine")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let state = console::run(
        AppState::with_top_k(config.top_k),
        stdin.lock(),
        stdout.lock(),
        &engine,
    )?;

    engine_info!("exiting after {} queries", state.queries_run());
    Ok(())
}
