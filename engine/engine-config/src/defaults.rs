//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and the
//! documented defaults can never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    board: BoardDefaults,
    mcts: MctsDefaults,
    player: PlayerDefaults,
    actor: ActorDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct BoardDefaults {
    width: usize,
    height: usize,
    target: usize,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    time_budget_ms: u64,
    max_iterations: u32,
    exploration: f64,
    epsilon: f64,
    selection_rule: String,
}

#[derive(Debug, Deserialize)]
struct PlayerDefaults {
    open_in_center: bool,
}

#[derive(Debug, Deserialize)]
struct ActorDefaults {
    matches: u32,
    opponent: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Board
pub fn width() -> usize {
    DEFAULTS.board.width
}
pub fn height() -> usize {
    DEFAULTS.board.height
}
pub fn target() -> usize {
    DEFAULTS.board.target
}

// MCTS
pub fn time_budget_ms() -> u64 {
    DEFAULTS.mcts.time_budget_ms
}
pub fn max_iterations() -> u32 {
    DEFAULTS.mcts.max_iterations
}
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn epsilon() -> f64 {
    DEFAULTS.mcts.epsilon
}
pub fn selection_rule() -> &'static str {
    &DEFAULTS.mcts.selection_rule
}

// Player
pub fn open_in_center() -> bool {
    DEFAULTS.player.open_in_center
}

// Actor
pub fn matches() -> u32 {
    DEFAULTS.actor.matches
}
pub fn opponent() -> &'static str {
    &DEFAULTS.actor.opponent
}
