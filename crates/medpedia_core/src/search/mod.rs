//! Topic filtering over materialized trees.
//!
//! # Responsibility
//! - Compute per-node visibility/expansion for a free-text name query.
//! - Stay independent from storage; input is an in-memory forest.

pub mod filter;
