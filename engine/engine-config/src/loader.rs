//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "CONNECTN_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the CONNECTN_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied. A file that
/// cannot be read or parsed is reported and replaced by the defaults.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => load_from_str(&content).unwrap_or_else(|e| {
            warn!("Failed to parse {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }),
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Parse TOML text and apply environment overrides on top.
pub fn load_from_str(content: &str) -> Result<CentralConfig, toml::de::Error> {
    toml::from_str(content).map(apply_env_overrides)
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (usize, u64, f64, bool, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring {}: not a valid value", $key),
            Err(_) => {}
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = Some(v),
            Ok(Err(_)) => warn!("Ignoring {}: not a valid value", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: CONNECTN_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "CONNECTN_COMMON_LOG_LEVEL");

    // Board
    env_override!(config, board.width, "CONNECTN_BOARD_WIDTH", parse);
    env_override!(config, board.height, "CONNECTN_BOARD_HEIGHT", parse);
    env_override!(config, board.target, "CONNECTN_BOARD_TARGET", parse);

    // MCTS
    env_override!(
        config,
        mcts.time_budget_ms,
        "CONNECTN_MCTS_TIME_BUDGET_MS",
        parse
    );
    env_override!(
        config,
        mcts.max_iterations,
        "CONNECTN_MCTS_MAX_ITERATIONS",
        parse
    );
    env_override!(config, mcts.exploration, "CONNECTN_MCTS_EXPLORATION", parse);
    env_override!(config, mcts.epsilon, "CONNECTN_MCTS_EPSILON", parse);
    env_override!(
        config,
        mcts.selection_rule,
        "CONNECTN_MCTS_SELECTION_RULE"
    );
    env_override!(config, mcts.seed, "CONNECTN_MCTS_SEED", optional_parse);

    // Player
    env_override!(
        config,
        player.open_in_center,
        "CONNECTN_PLAYER_OPEN_IN_CENTER",
        parse
    );

    // Actor
    env_override!(config, actor.matches, "CONNECTN_ACTOR_MATCHES", parse);
    env_override!(config, actor.opponent, "CONNECTN_ACTOR_OPPONENT");

    config
}
