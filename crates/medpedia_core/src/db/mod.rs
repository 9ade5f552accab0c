//! SQLite storage bootstrap, schema and sample data.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the encyclopedia.
//! - Ensure the `topics` schema on self-seeded databases.
//! - Populate the built-in sample hierarchy exactly once.
//!
//! # Invariants
//! - Core code must not read topics before the schema exists.
//! - Imported databases are opened as-is: no schema changes, no seeding.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
pub mod seed;

pub use open::{open_db, open_db_in_memory, open_existing_db, DEFAULT_DB_FILE_NAME};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl DbError {
    /// Returns whether SQLite rejected the file as not being a database.
    pub fn is_not_a_database(&self) -> bool {
        match self {
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::NotADatabase
            }
            Self::Sqlite(_) => false,
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
