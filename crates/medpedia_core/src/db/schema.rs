//! Topic schema definition and introspection helpers.
//!
//! # Responsibility
//! - Create the `topics` table on databases owned by this application.
//! - Answer "does this connection look like an encyclopedia database?"
//!   for repositories and the importer.
//!
//! # Invariants
//! - Schema creation is idempotent (`IF NOT EXISTS`).

use super::DbResult;
use rusqlite::Connection;

/// Table holding every encyclopedia topic.
pub const TOPICS_TABLE: &str = "topics";

/// Columns every readable `topics` table must expose.
pub const REQUIRED_TOPIC_COLUMNS: [&str; 4] = ["id", "name", "description", "parent_id"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `topics` table and its parent index when missing.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether a table or view with the given name exists.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type IN ('table', 'view') AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns whether `table` declares `column`.
pub fn table_has_column(conn: &Connection, table: &str, column: &str) -> DbResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns the first required `topics` column that is missing, if any.
pub fn missing_topic_column(conn: &Connection) -> DbResult<Option<&'static str>> {
    for column in REQUIRED_TOPIC_COLUMNS {
        if !table_has_column(conn, TOPICS_TABLE, column)? {
            return Ok(Some(column));
        }
    }
    Ok(None)
}
