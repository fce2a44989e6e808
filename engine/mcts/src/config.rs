//! MCTS configuration parameters.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Wall-clock budget used when nothing else is configured.
pub const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(5000);

/// Exploration constant `C` in the UCB1 formula.
pub const DEFAULT_EXPLORATION: f64 = 2.0;

/// Guard added to every visit count that appears as a divisor in UCB1.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// When a search stops. Either limit ends the search; checked once per
/// iteration, so a running iteration always completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBudget {
    pub time: Option<Duration>,
    pub iterations: Option<u32>,
}

impl SearchBudget {
    /// Stop once `limit` of wall-clock time has elapsed.
    pub fn time(limit: Duration) -> Self {
        Self {
            time: Some(limit),
            iterations: None,
        }
    }

    /// Stop after exactly `n` iterations, independent of the clock.
    pub fn iterations(n: u32) -> Self {
        Self {
            time: None,
            iterations: Some(n),
        }
    }

    /// Add an iteration cap on top of an existing budget.
    pub fn and_iterations(mut self, n: u32) -> Self {
        self.iterations = Some(n);
        self
    }

    /// A budget with no limit would never stop.
    pub fn is_bounded(&self) -> bool {
        self.time.is_some() || self.iterations.is_some()
    }

    /// Check whether a search that has run `completed` iterations for
    /// `elapsed` must stop.
    pub fn is_exhausted(&self, elapsed: Duration, completed: u32) -> bool {
        self.time.is_some_and(|limit| elapsed >= limit)
            || self.iterations.is_some_and(|limit| completed >= limit)
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::time(DEFAULT_TIME_BUDGET)
    }
}

/// How the child with the best UCB1 value is picked, both while descending
/// and when the final move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionRule {
    /// Start the argmax at a zero baseline with strict comparison. When no
    /// child beats zero, the first child is taken. Unvisited children are
    /// not favored over visited children with a non-positive mean.
    #[default]
    ZeroBaseline,

    /// Take the first unvisited child if any, otherwise the strict argmax
    /// of UCB1 seeded at negative infinity.
    UnvisitedFirst,
}

impl SelectionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionRule::ZeroBaseline => "zero_baseline",
            SelectionRule::UnvisitedFirst => "unvisited_first",
        }
    }
}

/// Error returned for an unknown selection rule name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown selection rule '{0}', expected 'zero_baseline' or 'unvisited_first'")]
pub struct ParseSelectionRuleError(pub String);

impl FromStr for SelectionRule {
    type Err = ParseSelectionRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero_baseline" => Ok(SelectionRule::ZeroBaseline),
            "unvisited_first" => Ok(SelectionRule::UnvisitedFirst),
            _ => Err(ParseSelectionRuleError(s.to_string())),
        }
    }
}

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// When to stop iterating and pick a move.
    pub budget: SearchBudget,

    /// Exploration constant `C` in
    /// `score / (n + eps) + C * sqrt(ln(N) / (n + eps))`.
    pub exploration: f64,

    /// Small constant added to visit counts before dividing.
    pub epsilon: f64,

    /// Argmax rule for descending the tree and finalizing.
    pub selection: SelectionRule,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            exploration: DEFAULT_EXPLORATION,
            epsilon: DEFAULT_EPSILON,
            selection: SelectionRule::default(),
        }
    }
}

impl MctsConfig {
    /// Create a fast, clock-independent config for testing.
    pub fn for_testing() -> Self {
        Self {
            budget: SearchBudget::iterations(200),
            ..Self::default()
        }
    }

    /// Builder pattern: set the full budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: wall-clock budget only.
    pub fn with_time_budget(mut self, limit: Duration) -> Self {
        self.budget = SearchBudget::time(limit);
        self
    }

    /// Builder pattern: fixed iteration count only.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.budget = SearchBudget::iterations(n);
        self
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set the visit count guard.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Builder pattern: set selection rule.
    pub fn with_selection(mut self, rule: SelectionRule) -> Self {
        self.selection = rule;
        self
    }
}
