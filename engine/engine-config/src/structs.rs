//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_width() -> usize {
    defaults::width()
}
fn d_height() -> usize {
    defaults::height()
}
fn d_target() -> usize {
    defaults::target()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_max_iterations() -> u32 {
    defaults::max_iterations()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_epsilon() -> f64 {
    defaults::epsilon()
}
fn d_selection_rule() -> String {
    defaults::selection_rule().into()
}
fn d_open_in_center() -> bool {
    defaults::open_in_center()
}
fn d_matches() -> u32 {
    defaults::matches()
}
fn d_opponent() -> String {
    defaults::opponent().into()
}

/// Values that parse but describe something unplayable.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid [{section}] {key}: {reason}")]
    Validation {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(section: &'static str, key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Validation {
            section,
            key,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

impl CentralConfig {
    /// Check every section. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()?;
        self.mcts.validate()?;
        self.actor.validate()
    }
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Board geometry and winning run length
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(default = "d_width")]
    pub width: usize,
    #[serde(default = "d_height")]
    pub height: usize,
    /// Pieces in a row needed to win
    #[serde(default = "d_target")]
    pub target: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
            target: defaults::target(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::invalid("board", "width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(ConfigError::invalid("board", "height", "must be at least 1"));
        }
        if self.target == 0 {
            return Err(ConfigError::invalid("board", "target", "must be at least 1"));
        }
        if self.target > self.width && self.target > self.height {
            return Err(ConfigError::invalid(
                "board",
                "target",
                format!(
                    "{} does not fit on a {}x{} board",
                    self.target, self.width, self.height
                ),
            ));
        }
        Ok(())
    }
}

/// Search budget and UCB1 constants
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Wall-clock budget per decision in milliseconds (0 = no time limit)
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Iterations per decision (0 = no iteration limit)
    #[serde(default = "d_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_epsilon")]
    pub epsilon: f64,
    #[serde(default = "d_selection_rule")]
    pub selection_rule: String,
    /// Rollout seed; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: defaults::time_budget_ms(),
            max_iterations: defaults::max_iterations(),
            exploration: defaults::exploration(),
            epsilon: defaults::epsilon(),
            selection_rule: defaults::selection_rule().into(),
            seed: None,
        }
    }
}

impl MctsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_budget_ms == 0 && self.max_iterations == 0 {
            return Err(ConfigError::invalid(
                "mcts",
                "time_budget_ms",
                "a time budget or max_iterations must be set",
            ));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::invalid(
                "mcts",
                "exploration",
                format!("{} is not a finite non-negative number", self.exploration),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::invalid(
                "mcts",
                "epsilon",
                format!("{} is not a finite positive number", self.epsilon),
            ));
        }
        if !matches!(
            self.selection_rule.trim().to_ascii_lowercase().as_str(),
            "zero_baseline" | "unvisited_first"
        ) {
            return Err(ConfigError::invalid(
                "mcts",
                "selection_rule",
                format!(
                    "unknown rule '{}', expected 'zero_baseline' or 'unvisited_first'",
                    self.selection_rule
                ),
            ));
        }
        Ok(())
    }
}

/// MCTS player behavior outside the search itself
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayerConfig {
    /// Play the middle column on an empty board without searching
    #[serde(default = "d_open_in_center")]
    pub open_in_center: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            open_in_center: defaults::open_in_center(),
        }
    }
}

/// Local match runner settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    /// Number of matches to play
    #[serde(default = "d_matches")]
    pub matches: u32,
    /// Second seat: "mcts" or "random"
    #[serde(default = "d_opponent")]
    pub opponent: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            matches: defaults::matches(),
            opponent: defaults::opponent().into(),
        }
    }
}

impl ActorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(
            self.opponent.trim().to_ascii_lowercase().as_str(),
            "mcts" | "random"
        ) {
            return Err(ConfigError::invalid(
                "actor",
                "opponent",
                format!("unknown opponent '{}', expected 'mcts' or 'random'", self.opponent),
            ));
        }
        Ok(())
    }
}
