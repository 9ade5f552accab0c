//! Incremental name filter over a materialized topic forest.
//!
//! # Responsibility
//! - Decide, for every node, whether it is shown and whether it is expanded
//!   for one query string.
//!
//! # Invariants
//! - Pure function of `(forest, query)`; repeated calls give equal outcomes.
//! - A visible node's ancestors are always visible and expanded, so every
//!   match is reachable from a root.
//! - Empty query shows everything and expands only depth-0 nodes.
//! - Leaves are never reported as expanded.

use crate::model::topic::{TopicId, TopicNode};
use std::collections::{BTreeMap, BTreeSet};

/// Display decision for one tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeState {
    pub visible: bool,
    pub expanded: bool,
    /// Node name itself contains the query (drives highlighting).
    pub self_match: bool,
}

/// Per-node filter decisions for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    query: String,
    states: BTreeMap<TopicId, NodeState>,
}

impl FilterOutcome {
    /// Normalized query this outcome was computed for.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty_query(&self) -> bool {
        self.query.is_empty()
    }

    /// Returns the decision for one node, `None` if it was not in the forest.
    pub fn state(&self, id: TopicId) -> Option<NodeState> {
        self.states.get(&id).copied()
    }

    pub fn visible_ids(&self) -> BTreeSet<TopicId> {
        self.ids_where(|state| state.visible)
    }

    pub fn expanded_ids(&self) -> BTreeSet<TopicId> {
        self.ids_where(|state| state.expanded)
    }

    pub fn matched_ids(&self) -> BTreeSet<TopicId> {
        self.ids_where(|state| state.self_match)
    }

    fn ids_where(&self, predicate: impl Fn(&NodeState) -> bool) -> BTreeSet<TopicId> {
        self.states
            .iter()
            .filter(|(_, state)| predicate(state))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Trims and lowercases raw filter input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Computes visibility and expansion for every node in `forest`.
pub fn apply_filter(forest: &[TopicNode], raw_query: &str) -> FilterOutcome {
    let query = normalize_query(raw_query);
    let mut states = BTreeMap::new();

    if query.is_empty() {
        for root in forest {
            reset_node(root, 0, &mut states);
        }
    } else {
        for root in forest {
            evaluate_node(root, &query, &mut states);
        }
    }

    FilterOutcome { query, states }
}

fn reset_node(node: &TopicNode, depth: usize, states: &mut BTreeMap<TopicId, NodeState>) {
    states.insert(
        node.id(),
        NodeState {
            visible: true,
            expanded: depth == 0 && node.has_children(),
            self_match: true,
        },
    );
    for child in &node.children {
        reset_node(child, depth + 1, states);
    }
}

/// Returns whether `node` ends up visible.
fn evaluate_node(
    node: &TopicNode,
    query: &str,
    states: &mut BTreeMap<TopicId, NodeState>,
) -> bool {
    let self_match = node.name().to_lowercase().contains(query);

    let mut descendant_match = false;
    for child in &node.children {
        // Evaluate every child, not just until the first match.
        descendant_match |= evaluate_node(child, query, states);
    }

    let visible = self_match || descendant_match;
    states.insert(
        node.id(),
        NodeState {
            visible,
            expanded: visible && node.has_children(),
            self_match,
        },
    );
    visible
}
