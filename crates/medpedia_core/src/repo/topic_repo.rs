//! Topic repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide read APIs over the `topics` hierarchy.
//! - Keep SQL details and ordering behavior inside repository boundary.
//!
//! # Invariants
//! - Child listing is deterministic: `name COLLATE NOCASE ASC, id ASC`.
//! - Repositories are only built over connections exposing the required
//!   `topics` columns.

use crate::db::schema::{missing_topic_column, table_exists, TOPICS_TABLE};
use crate::db::DbError;
use crate::model::topic::{Topic, TopicId};
use rusqlite::{Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TOPIC_SELECT_SQL: &str = "SELECT id, name, description, parent_id FROM topics";

/// Result type used by topic repository operations.
pub type TopicRepoResult<T> = Result<T, TopicRepoError>;

/// Errors from topic repository operations.
#[derive(Debug)]
pub enum TopicRepoError {
    /// Underlying SQLite error.
    Db(DbError),
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to valid read model.
    InvalidData(String),
}

impl Display for TopicRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "topic repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "topic repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid topic data: {message}"),
        }
    }
}

impl Error for TopicRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for TopicRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TopicRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for topic reads.
pub trait TopicRepository {
    /// Lists direct children of `parent_id`, or roots when `None`.
    fn list_children(&self, parent_id: Option<TopicId>) -> TopicRepoResult<Vec<Topic>>;
    /// Loads one topic by id.
    fn get_topic(&self, id: TopicId) -> TopicRepoResult<Option<Topic>>;
}

impl<R: TopicRepository + ?Sized> TopicRepository for &R {
    fn list_children(&self, parent_id: Option<TopicId>) -> TopicRepoResult<Vec<Topic>> {
        (**self).list_children(parent_id)
    }

    fn get_topic(&self, id: TopicId) -> TopicRepoResult<Option<Topic>> {
        (**self).get_topic(id)
    }
}

/// SQLite-backed topic repository.
pub struct SqliteTopicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTopicRepository<'conn> {
    /// Creates repository after checking the `topics` table shape.
    pub fn try_new(conn: &'conn Connection) -> TopicRepoResult<Self> {
        ensure_topic_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Proves the table is queryable and that no row would fail later reads.
    pub fn probe(&self) -> TopicRepoResult<()> {
        let mut stmt = self.conn.prepare(&format!("{TOPIC_SELECT_SQL} LIMIT 1;"))?;
        let mut rows = stmt.query([])?;
        if let Some(row) = rows.next()? {
            parse_topic_row(row)?;
        }

        let blank_name_id: Option<TopicId> = self
            .conn
            .query_row(
                "SELECT id FROM topics
                 WHERE name IS NULL OR trim(name) = ''
                 ORDER BY id ASC
                 LIMIT 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = blank_name_id {
            return Err(TopicRepoError::InvalidData(format!(
                "blank name for topic {id} in topics.name"
            )));
        }
        Ok(())
    }
}

impl TopicRepository for SqliteTopicRepository<'_> {
    fn list_children(&self, parent_id: Option<TopicId>) -> TopicRepoResult<Vec<Topic>> {
        let mut stmt;
        let mut rows = match parent_id {
            Some(parent_id) => {
                stmt = self.conn.prepare(&format!(
                    "{TOPIC_SELECT_SQL}
                     WHERE parent_id = ?1
                     ORDER BY name COLLATE NOCASE ASC, id ASC;"
                ))?;
                stmt.query([parent_id])?
            }
            None => {
                stmt = self.conn.prepare(&format!(
                    "{TOPIC_SELECT_SQL}
                     WHERE parent_id IS NULL
                     ORDER BY name COLLATE NOCASE ASC, id ASC;"
                ))?;
                stmt.query([])?
            }
        };

        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_topic_row(row)?);
        }
        Ok(items)
    }

    fn get_topic(&self, id: TopicId) -> TopicRepoResult<Option<Topic>> {
        let topic = self
            .conn
            .query_row(
                &format!("{TOPIC_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| {
                    Ok((
                        row.get::<_, TopicId>("id")?,
                        row.get::<_, Option<String>>("name")?,
                        row.get::<_, Option<String>>("description")?,
                        row.get::<_, Option<TopicId>>("parent_id")?,
                    ))
                },
            )
            .optional()?;

        topic
            .map(|(id, name, description, parent_id)| {
                build_topic(id, name, description, parent_id)
            })
            .transpose()
    }
}

fn parse_topic_row(row: &Row<'_>) -> TopicRepoResult<Topic> {
    build_topic(
        row.get("id")?,
        row.get("name")?,
        row.get("description")?,
        row.get("parent_id")?,
    )
}

fn build_topic(
    id: TopicId,
    name: Option<String>,
    description: Option<String>,
    parent_id: Option<TopicId>,
) -> TopicRepoResult<Topic> {
    let name = match name {
        Some(name) if !name.trim().is_empty() => name,
        _ => {
            return Err(TopicRepoError::InvalidData(format!(
                "blank name for topic {id} in topics.name"
            )));
        }
    };

    Ok(Topic {
        id,
        name,
        // Imported files may lack the NOT NULL constraint.
        description: description.unwrap_or_default(),
        parent_id,
    })
}

fn ensure_topic_connection_ready(conn: &Connection) -> TopicRepoResult<()> {
    if !table_exists(conn, TOPICS_TABLE)? {
        return Err(TopicRepoError::MissingRequiredTable(TOPICS_TABLE));
    }
    if let Some(column) = missing_topic_column(conn)? {
        return Err(TopicRepoError::MissingRequiredColumn {
            table: TOPICS_TABLE,
            column,
        });
    }
    Ok(())
}
