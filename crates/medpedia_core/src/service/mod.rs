//! Core use-case services.
//!
//! # Responsibility
//! - Own the active connection and orchestrate repository reads.
//! - Keep presentation layers decoupled from storage details.

pub mod description;
pub mod import;
pub mod topic_store;
pub mod tree_service;
