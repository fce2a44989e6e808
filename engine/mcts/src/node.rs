//! MCTS tree node representation.
//!
//! Each node owns the board snapshot reached by taking an action from its
//! parent, plus the visit and score statistics used for UCB1 selection.
//! Scores are always relative to the searching player fixed in the root
//! snapshot, at every depth.

use games_connectn::{Action, Snapshot};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led here from the parent (None for root)
    pub action: Option<Action>,

    /// Board position at this node
    pub snapshot: Snapshot,

    /// Number of rollouts backpropagated through this node
    pub visit_count: u32,

    /// Sum of rollout results (+1 win, -1 loss, 0 draw) through this node
    pub score: i64,

    /// Children in move generator order. Empty until expanded.
    pub children: Vec<NodeId>,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(snapshot: Snapshot) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            snapshot,
            visit_count: 0,
            score: 0,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: Action, snapshot: Snapshot) -> Self {
        Self {
            parent,
            action: Some(action),
            snapshot,
            visit_count: 0,
            score: 0,
            children: Vec::new(),
        }
    }

    /// Count one rollout through this node.
    #[inline]
    pub fn record(&mut self, delta: i64) {
        self.visit_count += 1;
        self.score += delta;
    }

    /// Average rollout result. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.score as f64 / self.visit_count as f64
        }
    }

    /// UCB1 value of this node as a child of a parent with `parent_visits`:
    /// `score / (n + eps) + c * sqrt(ln(N) / (n + eps))`.
    ///
    /// A parent with zero visits gives `ln(0)` and the result is NaN, which
    /// never compares greater than anything.
    #[inline]
    pub fn ucb1(&self, parent_visits: u32, exploration: f64, epsilon: f64) -> f64 {
        let visits = self.visit_count as f64 + epsilon;
        let exploit = self.score as f64 / visits;
        let explore = exploration * ((parent_visits as f64).ln() / visits).sqrt();
        exploit + explore
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connectn::Player;

    fn empty_snapshot() -> Snapshot {
        Snapshot::new(7, 6, Player::A)
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(empty_snapshot());

        assert!(node.parent.is_none());
        assert_eq!(node.action, None);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.score, 0);
        assert!(node.children.is_empty());
        assert_eq!(node.snapshot, empty_snapshot());
    }

    #[test]
    fn test_record_and_mean() {
        let mut node = MctsNode::new_root(empty_snapshot());
        assert!(node.mean_score().abs() < 1e-12);

        node.record(1);
        node.record(-1);
        node.record(1);
        node.record(0);
        assert_eq!(node.visit_count, 4);
        assert_eq!(node.score, 1);
        assert!((node.mean_score() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1() {
        let mut node = MctsNode::new_child(NodeId(0), Action::new(0, 0), empty_snapshot());
        node.visit_count = 10;
        node.score = 5;

        // 5 / 10 + 2 * sqrt(ln(100) / 10) = 0.5 + 2 * 0.6786... = 1.8572...
        let ucb = node.ucb1(100, 2.0, 0.0);
        let expected = 0.5 + 2.0 * ((100f64).ln() / 10.0).sqrt();
        assert!((ucb - expected).abs() < 1e-12);
        assert!((ucb - 1.8572).abs() < 1e-3);

        // The guard only nudges the result.
        let guarded = node.ucb1(100, 2.0, 1e-5);
        assert!((guarded - ucb).abs() < 1e-5);
    }

    #[test]
    fn test_ucb1_unvisited_child_is_large() {
        let node = MctsNode::new_child(NodeId(0), Action::new(0, 0), empty_snapshot());
        // sqrt(ln(2) / 1e-5) is roughly 263, times C.
        assert!(node.ucb1(2, 2.0, 1e-5) > 500.0);
        // ln(1) = 0 removes the exploration term entirely.
        assert!(node.ucb1(1, 2.0, 1e-5).abs() < 1e-12);
    }

    #[test]
    fn test_ucb1_zero_parent_visits_is_nan() {
        let node = MctsNode::new_child(NodeId(0), Action::new(0, 0), empty_snapshot());
        assert!(node.ucb1(0, 2.0, 1e-5).is_nan());
    }

    #[test]
    fn test_is_leaf() {
        let mut node = MctsNode::new_root(empty_snapshot());
        assert!(node.is_leaf());
        assert!(!node.is_expanded());

        node.children.push(NodeId(1));
        assert!(!node.is_leaf());
        assert!(node.is_expanded());
    }
}
