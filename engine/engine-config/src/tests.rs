//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(
        config.board,
        BoardConfig {
            width: 7,
            height: 6,
            target: 4,
        }
    );
    assert_eq!(config.mcts.time_budget_ms, 5000);
    assert_eq!(config.mcts.max_iterations, 0);
    assert_eq!(config.mcts.selection_rule, "zero_baseline");
    assert!(config.mcts.seed.is_none());
    assert!(config.player.open_in_center);
    assert_eq!(config.actor.matches, 1);
    assert_eq!(config.actor.opponent, "mcts");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[board]
width = 9
height = 7
target = 5

[mcts]
time_budget_ms = 250
max_iterations = 10000
exploration = 1.4
selection_rule = "unvisited_first"
seed = 42

[player]
open_in_center = false

[actor]
matches = 20
opponent = "random"
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.board.width, 9);
    assert_eq!(config.board.height, 7);
    assert_eq!(config.board.target, 5);
    assert_eq!(config.mcts.time_budget_ms, 250);
    assert_eq!(config.mcts.max_iterations, 10000);
    assert!((config.mcts.exploration - 1.4).abs() < f64::EPSILON);
    assert_eq!(config.mcts.selection_rule, "unvisited_first");
    assert_eq!(config.mcts.seed, Some(42));
    assert!(!config.player.open_in_center);
    assert_eq!(config.actor.matches, 20);
    assert_eq!(config.actor.opponent, "random");
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[board]
target = 3
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.board.target, 3);
    assert_eq!(config.board.width, 7); // Default
    assert_eq!(config.mcts.time_budget_ms, 5000); // Default
    assert!((config.mcts.epsilon - 1e-5).abs() < f64::EPSILON); // Default
    assert!(config.player.open_in_center); // Default
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(load_from_str("[board]\nwidth = \"wide\"\n").is_err());
    assert!(load_from_str("not toml at all [").is_err());
}

#[test]
fn test_unreadable_file_falls_back_to_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/connectn/config.toml"));
    assert_eq!(config.board.width, BoardConfig::default().width);
}

#[test]
fn test_env_overrides() {
    std::env::set_var("CONNECTN_BOARD_HEIGHT", "8");
    std::env::set_var("CONNECTN_MCTS_SEED", "7");
    std::env::set_var("CONNECTN_PLAYER_OPEN_IN_CENTER", "false");
    std::env::set_var("CONNECTN_ACTOR_OPPONENT", "random");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.board.height, 8);
    assert_eq!(config.mcts.seed, Some(7));
    assert!(!config.player.open_in_center);
    assert_eq!(config.actor.opponent, "random");

    std::env::remove_var("CONNECTN_BOARD_HEIGHT");
    std::env::remove_var("CONNECTN_MCTS_SEED");
    std::env::remove_var("CONNECTN_PLAYER_OPEN_IN_CENTER");
    std::env::remove_var("CONNECTN_ACTOR_OPPONENT");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("CONNECTN_MCTS_MAX_ITERATIONS", "lots");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.max_iterations, 0);

    std::env::remove_var("CONNECTN_MCTS_MAX_ITERATIONS");
}

#[test]
fn test_board_validation() {
    let mut board = BoardConfig::default();
    assert!(board.validate().is_ok());

    board.width = 0;
    assert!(matches!(
        board.validate(),
        Err(ConfigError::Validation { key: "width", .. })
    ));

    let board = BoardConfig {
        width: 3,
        height: 3,
        target: 0,
    };
    assert!(matches!(
        board.validate(),
        Err(ConfigError::Validation { key: "target", .. })
    ));

    // A run only has to fit along one axis.
    let tall = BoardConfig {
        width: 2,
        height: 5,
        target: 5,
    };
    assert!(tall.validate().is_ok());

    let too_long = BoardConfig {
        width: 4,
        height: 4,
        target: 5,
    };
    let err = too_long.validate().unwrap_err();
    assert!(err.to_string().contains("does not fit on a 4x4 board"));
}

#[test]
fn test_mcts_validation() {
    let mut mcts = MctsConfig::default();
    assert!(mcts.validate().is_ok());

    mcts.time_budget_ms = 0;
    assert!(mcts.validate().is_err());
    mcts.max_iterations = 500;
    assert!(mcts.validate().is_ok());

    mcts.exploration = f64::NAN;
    assert!(matches!(
        mcts.validate(),
        Err(ConfigError::Validation { key: "exploration", .. })
    ));
    mcts.exploration = 2.0;

    mcts.epsilon = 0.0;
    assert!(matches!(
        mcts.validate(),
        Err(ConfigError::Validation { key: "epsilon", .. })
    ));
    mcts.epsilon = 1e-5;

    mcts.selection_rule = "greedy".into();
    assert!(matches!(
        mcts.validate(),
        Err(ConfigError::Validation { key: "selection_rule", .. })
    ));
}

#[test]
fn test_actor_validation() {
    let mut actor = ActorConfig::default();
    assert!(actor.validate().is_ok());
    actor.opponent = "human".into();
    assert!(actor.validate().is_err());
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.board, cloned.board);
    assert_eq!(config.mcts.selection_rule, cloned.mcts.selection_rule);
}
