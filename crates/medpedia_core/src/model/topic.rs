//! Topic domain model.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes.
//! - `name` is non-empty.
//! - `parent_id`, when set, references another topic.

use serde::{Deserialize, Serialize};

/// Storage-assigned topic identifier.
pub type TopicId = i64;

/// One encyclopedia entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    /// Display label, also the filter target.
    pub name: String,
    /// Free text; paragraphs are separated by newlines.
    pub description: String,
    /// `None` marks a root topic.
    pub parent_id: Option<TopicId>,
}

impl Topic {
    /// Returns whether this topic sits at the top of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Materialized tree node: one topic plus its ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub topic: Topic,
    pub children: Vec<TopicNode>,
}

impl TopicNode {
    pub fn id(&self) -> TopicId {
        self.topic.id
    }

    pub fn name(&self) -> &str {
        &self.topic.name
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Counts this node and every descendant.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TopicNode::subtree_len)
            .sum::<usize>()
    }
}
