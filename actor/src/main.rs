//! Actor - local match runner for the connect-N MCTS player
//!
//! A short-lived process that:
//! 1. Loads config.toml, environment overrides and command line flags
//! 2. Seats an MCTS player against a second MCTS or random player
//! 3. Plays the configured number of matches, alternating who moves first
//! 4. Logs every result and a final summary

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod config;
mod local_match;
mod player;
mod runner;
mod session;

use crate::config::Config;
use crate::runner::MatchRunner;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    info!(
        budget = ?config.budget(),
        exploration = config.exploration,
        selection_rule = %config.selection_rule,
        seed = ?config.seed(),
        open_in_center = config.open_in_center,
        "Search settings"
    );

    let mut runner = MatchRunner::new(&config)?;

    match runner.run() {
        Ok(stats) => {
            info!(played = stats.played, "Actor completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Actor failed: {}", e);
            Err(e)
        }
    }
}
