//! Monte Carlo Tree Search with UCB1 selection and random rollouts.
//!
//! The search works on [`Snapshot`](games_connectn::Snapshot)s of a
//! connect-N board. It never touches the live game: the caller captures a
//! snapshot, runs a search and plays the returned action itself.
//!
//! # Overview
//!
//! Every iteration runs four phases:
//!
//! 1. **Selection**: descend from the root by UCB1 until a childless node
//! 2. **Expansion**: a node reached for the second time gets one child per
//!    legal action and the first child is used for the rollout
//! 3. **Rollout**: play the position out with a [`RolloutPolicy`]
//! 4. **Backpropagation**: add the result (+1, -1 or 0 for the searching
//!    player) to every node on the path
//!
//! # Usage
//!
//! ```rust
//! use games_connectn::{Player, Snapshot};
//! use mcts::{run_mcts, MctsConfig, UniformRollout};
//!
//! let snapshot = Snapshot::new(7, 6, Player::A);
//! let mut policy = UniformRollout::seeded(42);
//! let config = MctsConfig::default().with_iterations(100);
//!
//! let result = run_mcts(snapshot, 4, config, &mut policy).unwrap();
//! assert_eq!(result.iterations, 100);
//! assert_eq!(result.action.row, 0);
//! ```
//!
//! # Configuration
//!
//! [`MctsConfig`] holds the stop condition and the UCB1 constants:
//!
//! - `budget`: wall-clock time and/or iteration count (default: 5 s)
//! - `exploration`: `C` in the UCB1 formula (default: 2.0)
//! - `epsilon`: guard added to visit counts before dividing (default: 1e-5)
//! - `selection`: argmax rule, see [`SelectionRule`]

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{MctsConfig, ParseSelectionRuleError, SearchBudget, SelectionRule};
pub use node::{MctsNode, NodeId};
pub use rollout::{rollout, score_outcome, FirstActionRollout, RolloutPolicy, UniformRollout};
pub use search::{run_mcts, ChildStats, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
