//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. A child refers to its parent by
//! index only; the parent's `children` list is the single owner of the
//! parent/child relation.

use games_connectn::Snapshot;

use crate::config::SelectionRule;
use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    /// Run length that wins the game
    target: usize,
}

impl MctsTree {
    /// Create a new tree rooted at `snapshot`.
    pub fn new(snapshot: Snapshot, target: usize) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(snapshot)],
            root: NodeId(0),
            target,
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode] {
        &self.nodes
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id).parent;
        parent.is_some().then_some(parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_leaf()
    }

    /// Add one child per legal action of the node's position, in move
    /// generator order. Does nothing if the node already has children.
    /// A won position is expanded like any other; only a full board gets
    /// no children.
    ///
    /// Returns the number of children the node has afterwards.
    pub fn expand(&mut self, id: NodeId) -> usize {
        let node = self.get(id);
        if node.is_expanded() {
            return node.children.len();
        }

        let children: Vec<_> = node
            .snapshot
            .legal_actions()
            .into_iter()
            .map(|action| (action, node.snapshot.apply(action)))
            .collect();

        for (action, snapshot) in children {
            let child_id = self.allocate(MctsNode::new_child(id, action, snapshot));
            self.get_mut(id).children.push(child_id);
        }

        self.get(id).children.len()
    }

    /// Count one rollout with result `delta` at a single node.
    #[inline]
    pub fn record(&mut self, id: NodeId, delta: i64) {
        self.get_mut(id).record(delta);
    }

    /// Backpropagate a rollout result from a node up to and including the
    /// root. Every node on the path receives the same `delta`.
    pub fn backpropagate(&mut self, leaf_id: NodeId, delta: i64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record(delta);
            current_id = node.parent;
        }
    }

    /// Index of the child with the best UCB1 value under `rule`, or `None`
    /// if the node has no children. Ties go to the earliest child.
    pub fn select_child(
        &self,
        node_id: NodeId,
        exploration: f64,
        epsilon: f64,
        rule: SelectionRule,
    ) -> Option<usize> {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return None;
        }

        let baseline = match rule {
            SelectionRule::ZeroBaseline => 0.0,
            SelectionRule::UnvisitedFirst => {
                if let Some(idx) = node
                    .children
                    .iter()
                    .position(|id| self.get(*id).visit_count == 0)
                {
                    return Some(idx);
                }
                f64::NEG_INFINITY
            }
        };

        let mut best_idx = 0;
        let mut best_value = baseline;
        for (idx, child_id) in node.children.iter().enumerate() {
            let value = self
                .get(*child_id)
                .ucb1(node.visit_count, exploration, epsilon);
            if value > best_value {
                best_idx = idx;
                best_value = value;
            }
        }

        Some(best_idx)
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_score: root.score,
            root_mean: root.mean_score(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_score: i64,
    pub root_mean: f64,
    pub max_depth: u32,
}
