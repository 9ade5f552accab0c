//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define read-oriented data access contracts for topics.
//! - Isolate SQLite query details from store/tree orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (missing table/column,
//!   invalid data) in addition to DB transport errors.

pub mod topic_repo;
