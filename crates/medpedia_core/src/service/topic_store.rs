//! Topic store: the single owner of the active database connection.
//!
//! # Responsibility
//! - Serve ordered tree reads to presentation layers.
//! - Swap the active database for an imported one without ever leaving
//!   the store half-switched.
//!
//! # Invariants
//! - `fetch_children` on a disconnected store returns an empty list.
//! - `fetch_topic` on a disconnected store fails with `NotConnected`.
//! - `close` is idempotent.
//! - `connect` releases the previous connection only after the candidate
//!   passed validation.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::topic::{Topic, TopicId, TopicNode};
use crate::repo::topic_repo::{SqliteTopicRepository, TopicRepoError, TopicRepository};
use crate::service::import::validate_candidate;
use crate::service::tree_service::{TreeError, TreeMaterializer};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Result type used by topic store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the topic store and importer.
#[derive(Debug)]
pub enum StoreError {
    /// No file exists at the import path.
    NotFound(PathBuf),
    /// File opened but is not a readable encyclopedia database.
    InvalidSchema(String),
    /// Storage engine failure (corruption, permission, I/O).
    Store(DbError),
    /// Stored rows cannot be turned into topics.
    InvalidData(String),
    /// Operation needs an active connection and none is open.
    NotConnected,
    /// Tree materialization failed on the stored hierarchy.
    Tree(TreeError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "database file not found: {}", path.display()),
            Self::InvalidSchema(reason) => {
                write!(f, "not a valid encyclopedia database: {reason}")
            }
            Self::Store(err) => write!(f, "database error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid topic data: {message}"),
            Self::NotConnected => write!(f, "no database is connected"),
            Self::Tree(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        if value.is_not_a_database() {
            return Self::InvalidSchema(value.to_string());
        }
        Self::Store(value)
    }
}

impl From<TopicRepoError> for StoreError {
    fn from(value: TopicRepoError) -> Self {
        match value {
            TopicRepoError::Db(err) => err.into(),
            TopicRepoError::MissingRequiredTable(_)
            | TopicRepoError::MissingRequiredColumn { .. } => {
                Self::InvalidSchema(value.to_string())
            }
            TopicRepoError::InvalidData(message) => Self::InvalidData(message),
        }
    }
}

impl From<TreeError> for StoreError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::Repo(err) => err.into(),
            other => Self::Tree(other),
        }
    }
}

/// Owner of the active encyclopedia connection.
#[derive(Default)]
pub struct TopicStore {
    conn: Option<Connection>,
    active_path: Option<PathBuf>,
}

impl TopicStore {
    /// Opens the self-seeded database at `path`, creating and seeding it on
    /// first run.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = open_db(path)?;
        Ok(Self {
            conn: Some(conn),
            active_path: Some(path.to_path_buf()),
        })
    }

    /// Opens a seeded in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: Some(open_db_in_memory()?),
            active_path: None,
        })
    }

    /// Creates a store with no active connection (import mode start-up).
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// File backing the active connection, if it is file-based.
    pub fn active_path(&self) -> Option<&Path> {
        self.active_path.as_deref()
    }

    /// Lists children of `parent_id` (roots when `None`), ordered
    /// case-insensitively by name.
    pub fn fetch_children(&self, parent_id: Option<TopicId>) -> StoreResult<Vec<Topic>> {
        let Some(conn) = self.conn.as_ref() else {
            return Ok(Vec::new());
        };
        let repo = SqliteTopicRepository::try_new(conn)?;
        Ok(repo.list_children(parent_id)?)
    }

    /// Loads one topic; `Ok(None)` when no topic has that id.
    pub fn fetch_topic(&self, id: TopicId) -> StoreResult<Option<Topic>> {
        let conn = self.conn.as_ref().ok_or(StoreError::NotConnected)?;
        let repo = SqliteTopicRepository::try_new(conn)?;
        Ok(repo.get_topic(id)?)
    }

    /// Builds the full topic forest; empty when disconnected.
    pub fn materialize_tree(&self) -> StoreResult<Vec<TopicNode>> {
        let Some(conn) = self.conn.as_ref() else {
            return Ok(Vec::new());
        };
        let repo = SqliteTopicRepository::try_new(conn)?;
        Ok(TreeMaterializer::new(repo).build_forest()?)
    }

    /// Validates the database at `path` and makes it the active one.
    ///
    /// On error the current connection and path are left untouched.
    pub fn connect(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let candidate = validate_candidate(path)?;

        self.close();
        self.conn = Some(candidate);
        self.active_path = Some(path.to_path_buf());
        info!(
            "event=db_import module=store status=ok path={}",
            path.display()
        );
        Ok(())
    }

    /// Releases the active connection. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.active_path = None;
        let Some(conn) = self.conn.take() else {
            return;
        };
        match conn.close() {
            Ok(()) => info!("event=store_close module=store status=ok"),
            // The connection handle is dropped either way.
            Err((_, err)) => {
                warn!("event=store_close module=store status=error error={err}")
            }
        }
    }
}

impl Drop for TopicStore {
    fn drop(&mut self) {
        self.close();
    }
}
