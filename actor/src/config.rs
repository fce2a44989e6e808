//! Configuration for the actor binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, BoardConfig, CentralConfig};
use mcts::{MctsConfig, SearchBudget, SelectionRule};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_width() -> usize {
    CENTRAL_CONFIG.board.width
}

fn default_height() -> usize {
    CENTRAL_CONFIG.board.height
}

fn default_target() -> usize {
    CENTRAL_CONFIG.board.target
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_budget_ms
}

fn default_max_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.max_iterations
}

fn default_exploration() -> f64 {
    CENTRAL_CONFIG.mcts.exploration
}

fn default_epsilon() -> f64 {
    CENTRAL_CONFIG.mcts.epsilon
}

fn default_selection_rule() -> String {
    CENTRAL_CONFIG.mcts.selection_rule.clone()
}

fn default_open_in_center() -> bool {
    CENTRAL_CONFIG.player.open_in_center
}

fn default_matches() -> u32 {
    CENTRAL_CONFIG.actor.matches
}

fn default_opponent() -> String {
    CENTRAL_CONFIG.actor.opponent.clone()
}

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Mcts,
    Random,
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "Connect-N actor - plays local MCTS matches")]
#[command(
    long_about = "Actor that plays connect-N matches between an MCTS player and a second
MCTS or random player, logging each result.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Board width in columns
    #[arg(long, default_value_t = default_width())]
    pub width: usize,

    /// Board height in rows
    #[arg(long, default_value_t = default_height())]
    pub height: usize,

    /// Pieces in a row needed to win
    #[arg(long, default_value_t = default_target())]
    pub target: usize,

    /// Wall-clock budget per move in milliseconds (0 to disable)
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Iterations per move (0 to disable)
    #[arg(long, default_value_t = default_max_iterations())]
    pub max_iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration())]
    pub exploration: f64,

    /// Guard added to visit counts in UCB1
    #[arg(long, default_value_t = default_epsilon())]
    pub epsilon: f64,

    /// Child selection rule (zero_baseline, unvisited_first)
    #[arg(long, default_value_t = default_selection_rule())]
    pub selection_rule: String,

    /// Rollout seed for reproducible matches (defaults to [mcts] seed, then entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Play the middle column on an empty board without searching
    #[arg(long, default_value_t = default_open_in_center(), action = ArgAction::Set)]
    pub open_in_center: bool,

    /// Number of matches to play
    #[arg(long, default_value_t = default_matches())]
    pub matches: u32,

    /// Second seat (mcts, random)
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.board().validate()?;
        self.central_mcts().validate()?;

        if self.matches == 0 {
            return Err(anyhow!("matches must be greater than 0"));
        }

        self.opponent()?;
        Ok(())
    }

    pub fn board(&self) -> BoardConfig {
        BoardConfig {
            width: self.width,
            height: self.height,
            target: self.target,
        }
    }

    fn central_mcts(&self) -> engine_config::MctsConfig {
        engine_config::MctsConfig {
            time_budget_ms: self.time_budget_ms,
            max_iterations: self.max_iterations,
            exploration: self.exploration,
            epsilon: self.epsilon,
            selection_rule: self.selection_rule.clone(),
            seed: self.seed,
        }
    }

    /// Stop condition per move. Zero disables a limit.
    pub fn budget(&self) -> SearchBudget {
        SearchBudget {
            time: (self.time_budget_ms > 0).then(|| Duration::from_millis(self.time_budget_ms)),
            iterations: (self.max_iterations > 0).then_some(self.max_iterations),
        }
    }

    /// Search settings for MCTS players.
    pub fn mcts_config(&self) -> Result<MctsConfig> {
        let selection: SelectionRule = self.selection_rule.parse()?;
        Ok(MctsConfig::default()
            .with_budget(self.budget())
            .with_exploration(self.exploration)
            .with_epsilon(self.epsilon)
            .with_selection(selection))
    }

    /// Command line seed first, then the configured one.
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }

    pub fn opponent(&self) -> Result<Opponent> {
        match self.opponent.trim().to_ascii_lowercase().as_str() {
            "mcts" => Ok(Opponent::Mcts),
            "random" => Ok(Opponent::Random),
            other => Err(anyhow!(
                "invalid opponent '{}', expected 'mcts' or 'random'",
                other
            )),
        }
    }
}
