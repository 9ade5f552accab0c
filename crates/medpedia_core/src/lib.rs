//! Core domain logic for the medical encyclopedia.
//! This crate is the single source of truth for topic storage, tree
//! materialization, filtering and import validation.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::DEFAULT_DB_FILE_NAME;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::topic::{Topic, TopicId, TopicNode};
pub use repo::topic_repo::{
    SqliteTopicRepository, TopicRepoError, TopicRepoResult, TopicRepository,
};
pub use search::filter::{apply_filter, normalize_query, FilterOutcome, NodeState};
pub use service::description::{paragraphs, to_html};
pub use service::import::{
    has_recognized_extension, import_file_filters, FileFilter, SUPPORTED_EXTENSIONS,
};
pub use service::topic_store::{StoreError, StoreResult, TopicStore};
pub use service::tree_service::{TreeError, TreeMaterializer, TreeResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
