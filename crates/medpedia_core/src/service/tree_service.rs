//! Topic tree materialization.
//!
//! # Responsibility
//! - Build the full in-memory topic forest (or one subtree) for display.
//!
//! # Invariants
//! - Sibling order at every level is the repository's order.
//! - Every topic id appears at most once; seeing an id twice is a cycle
//!   and fails the build instead of looping.

use crate::model::topic::{Topic, TopicId, TopicNode};
use crate::repo::topic_repo::{TopicRepoError, TopicRepository};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by tree materialization.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from tree materialization.
#[derive(Debug)]
pub enum TreeError {
    /// Requested subtree root does not exist.
    TopicNotFound(TopicId),
    /// The parent chain revisits this topic.
    CycleDetected(TopicId),
    /// Repository-level failure.
    Repo(TopicRepoError),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopicNotFound(id) => write!(f, "topic not found: {id}"),
            Self::CycleDetected(id) => {
                write!(f, "topic hierarchy contains a cycle at topic {id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TreeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TopicRepoError> for TreeError {
    fn from(value: TopicRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Builds [`TopicNode`] trees from a topic repository.
pub struct TreeMaterializer<R: TopicRepository> {
    repo: R,
}

impl<R: TopicRepository> TreeMaterializer<R> {
    /// Creates materializer from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Builds every root topic with all of its descendants.
    pub fn build_forest(&self) -> TreeResult<Vec<TopicNode>> {
        let roots = self.repo.list_children(None)?;
        let forest = self.attach_descendants(roots)?;
        debug!(
            "event=tree_build module=tree status=ok scope=forest roots={} nodes={}",
            forest.len(),
            forest.iter().map(TopicNode::subtree_len).sum::<usize>()
        );
        Ok(forest)
    }

    /// Builds the subtree rooted at `root_id`.
    pub fn build_subtree(&self, root_id: TopicId) -> TreeResult<TopicNode> {
        let root = self
            .repo
            .get_topic(root_id)?
            .ok_or(TreeError::TopicNotFound(root_id))?;
        let mut built = self.attach_descendants(vec![root])?;
        let node = built.pop().ok_or(TreeError::TopicNotFound(root_id))?;
        debug!(
            "event=tree_build module=tree status=ok scope=subtree root={} nodes={}",
            root_id,
            node.subtree_len()
        );
        Ok(node)
    }

    fn attach_descendants(&self, tops: Vec<Topic>) -> TreeResult<Vec<TopicNode>> {
        let mut visited = HashSet::new();
        let mut pending = Vec::new();
        for topic in &tops {
            mark_visited(&mut visited, topic.id)?;
            pending.push(topic.id);
        }

        let mut children_of: HashMap<TopicId, Vec<Topic>> = HashMap::new();
        while let Some(parent_id) = pending.pop() {
            let children = self.repo.list_children(Some(parent_id))?;
            for child in &children {
                mark_visited(&mut visited, child.id)?;
                pending.push(child.id);
            }
            children_of.insert(parent_id, children);
        }

        Ok(tops
            .into_iter()
            .map(|topic| assemble(topic, &mut children_of))
            .collect())
    }
}

fn mark_visited(visited: &mut HashSet<TopicId>, id: TopicId) -> TreeResult<()> {
    if !visited.insert(id) {
        warn!("event=tree_build module=tree status=error error_code=cycle_detected topic_id={id}");
        return Err(TreeError::CycleDetected(id));
    }
    Ok(())
}

// Depth is bounded by the visited check above.
fn assemble(topic: Topic, children_of: &mut HashMap<TopicId, Vec<Topic>>) -> TopicNode {
    let children = children_of.remove(&topic.id).unwrap_or_default();
    TopicNode {
        topic,
        children: children
            .into_iter()
            .map(|child| assemble(child, children_of))
            .collect(),
    }
}
