//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic shared
//! by the engine crates and the actor binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Command line flags (applied by the actor)
//! 2. Environment variables (`CONNECTN_<SECTION>_<KEY>`)
//! 3. config.toml file
//! 4. Built-in defaults (config.defaults.toml, embedded)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECTN_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECTN_BOARD_WIDTH=9
//!     CONNECTN_BOARD_TARGET=5
//!     CONNECTN_MCTS_TIME_BUDGET_MS=1000
//!     CONNECTN_MCTS_SEED=42
//!     CONNECTN_PLAYER_OPEN_IN_CENTER=false
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, load_from_str, CONFIG_ENV_VAR,
    CONFIG_SEARCH_PATHS,
};
pub use structs::*;

#[cfg(test)]
mod tests;
