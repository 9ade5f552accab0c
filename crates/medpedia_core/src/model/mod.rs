//! Domain model for the encyclopedia hierarchy.
//!
//! # Responsibility
//! - Define the topic record read from storage.
//! - Define the materialized tree node handed to presentation layers.
//!
//! # Invariants
//! - Every topic is identified by a stable integer `TopicId`.
//! - A topic without `parent_id` is a root.

pub mod topic;
