//! MCTS search implementation.
//!
//! Each iteration restarts at the root and runs:
//! 1. Selection: descend through children by UCB1 until reaching a leaf
//! 2. Expansion: a leaf seen before gets its children and the first child
//!    becomes the rollout node; a fresh leaf is rolled out as is
//! 3. Rollout: play the position out with the injected policy
//! 4. Backpropagation: record the result from the rollout node up to the root
//!
//! The loop stops when the [`SearchBudget`](crate::config::SearchBudget) is
//! exhausted, checked once per iteration. The move returned is the root
//! child with the best UCB1 value.

use std::time::{Duration, Instant};

use games_connectn::{Action, Player, Snapshot};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{rollout, RolloutPolicy};
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game is already over, won by {0}")]
    GameOver(Player),

    #[error("Invalid target run length {0}")]
    InvalidTarget(usize),

    #[error("Search budget has neither a time limit nor an iteration limit")]
    UnboundedBudget,

    #[error("Invalid {name} {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Statistics for one root child at the end of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats {
    pub action: Action,
    pub visits: u32,
    pub score: i64,
    pub ucb1: f64,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Move to play
    pub action: Action,

    /// Position of `action` among the root's legal actions
    pub index: usize,

    /// Number of completed select/rollout/backpropagate cycles
    pub iterations: u32,

    /// Root statistics after the last iteration
    pub root_visits: u32,
    pub root_score: i64,

    /// Per-child statistics in action order
    pub children: Vec<ChildStats>,

    pub elapsed: Duration,
}

/// MCTS search state for a single decision.
pub struct MctsSearch<'a, P: RolloutPolicy + ?Sized> {
    tree: MctsTree,
    config: MctsConfig,
    policy: &'a mut P,
    /// Legal actions of the root, index-aligned with the root's children
    root_actions: Vec<Action>,
    iterations: u32,
}

impl<'a, P: RolloutPolicy + ?Sized> MctsSearch<'a, P> {
    /// Create a new MCTS search from the given position.
    ///
    /// The root is expanded immediately, so every iteration passes through
    /// one of its children.
    pub fn new(
        snapshot: Snapshot,
        target: usize,
        config: MctsConfig,
        policy: &'a mut P,
    ) -> Result<Self, SearchError> {
        if target == 0 {
            return Err(SearchError::InvalidTarget(target));
        }
        if !config.budget.is_bounded() {
            return Err(SearchError::UnboundedBudget);
        }
        if !config.exploration.is_finite() || config.exploration < 0.0 {
            return Err(SearchError::InvalidParameter {
                name: "exploration",
                value: config.exploration,
                reason: "must be a finite, non-negative number",
            });
        }
        if !config.epsilon.is_finite() || config.epsilon <= 0.0 {
            return Err(SearchError::InvalidParameter {
                name: "epsilon",
                value: config.epsilon,
                reason: "must be a finite, positive number",
            });
        }
        if let Some(winner) = snapshot.winner(target) {
            return Err(SearchError::GameOver(winner));
        }

        let root_actions = snapshot.legal_actions();
        if root_actions.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let mut tree = MctsTree::new(snapshot, target);
        let root = tree.root();
        tree.expand(root);

        Ok(Self {
            tree,
            config,
            policy,
            root_actions,
            iterations: 0,
        })
    }

    /// Run iterations until the budget is spent, then pick a move.
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        let started = Instant::now();

        while !self
            .config
            .budget
            .is_exhausted(started.elapsed(), self.iterations)
        {
            self.iterate();
        }

        self.finalize(started.elapsed())
    }

    /// Run exactly one select/rollout/backpropagate cycle from the root.
    pub fn iterate(&mut self) {
        let leaf = self.select();
        let rollout_node = self.expand_leaf(leaf);

        let snapshot = &self.tree.get(rollout_node).snapshot;
        let delta = rollout(snapshot, self.tree.target(), &mut *self.policy);
        self.tree.backpropagate(rollout_node, delta);
        self.iterations += 1;

        trace!(
            iteration = self.iterations,
            leaf = leaf.0,
            rollout_node = rollout_node.0,
            delta,
            "MCTS iteration complete"
        );
    }

    /// Descend from the root to a childless node by UCB1.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        while let Some(idx) = self.tree.select_child(
            current,
            self.config.exploration,
            self.config.epsilon,
            self.config.selection,
        ) {
            current = self.tree.children(current)[idx];
        }

        current
    }

    /// Choose the node to roll out from a selected leaf. An unvisited leaf
    /// is rolled out directly. A visited one is expanded and its first child
    /// is used, unless the board is full and has no children.
    fn expand_leaf(&mut self, leaf: NodeId) -> NodeId {
        if self.tree.get(leaf).visit_count == 0 {
            return leaf;
        }

        self.tree.expand(leaf);
        self.tree.children(leaf).first().copied().unwrap_or(leaf)
    }

    /// Pick the root child with the best UCB1 value.
    fn finalize(&self, elapsed: Duration) -> Result<SearchResult, SearchError> {
        let root_id = self.tree.root();
        let index = self
            .tree
            .select_child(
                root_id,
                self.config.exploration,
                self.config.epsilon,
                self.config.selection,
            )
            .ok_or(SearchError::NoLegalMoves)?;
        let action = self.root_actions[index];

        let root = self.tree.get(root_id);
        let children: Vec<ChildStats> = root
            .children
            .iter()
            .zip(&self.root_actions)
            .map(|(id, action)| {
                let child = self.tree.get(*id);
                ChildStats {
                    action: *action,
                    visits: child.visit_count,
                    score: child.score,
                    ucb1: child.ucb1(
                        root.visit_count,
                        self.config.exploration,
                        self.config.epsilon,
                    ),
                }
            })
            .collect();

        debug!(
            column = action.column,
            row = action.row,
            index,
            iterations = self.iterations,
            root_visits = root.visit_count,
            root_score = root.score,
            nodes = self.tree.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "MCTS search finished"
        );

        Ok(SearchResult {
            action,
            index,
            iterations: self.iterations,
            root_visits: root.visit_count,
            root_score: root.score,
            children,
            elapsed,
        })
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    /// Iterations completed so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<P: RolloutPolicy + ?Sized>(
    snapshot: Snapshot,
    target: usize,
    config: MctsConfig,
    policy: &mut P,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(snapshot, target, config, policy)?;
    search.run()
}
