//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open self-seeded file or in-memory databases.
//! - Open existing external databases for import without touching them.
//! - Configure connection pragmas required by core behavior.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - A self-seeded file is seeded only when it did not exist before open.
//! - Seed rows are committed before the connection is returned.
//! - A file created by a failed `open_db` is removed again.

use super::schema::apply_schema;
use super::seed::populate_sample_data;
use super::DbResult;
use log::{error, info, warn};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// File name used by the self-seeding mode when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "medical_encyclopedia.db";

/// Opens (or creates) the self-seeded encyclopedia database.
///
/// A missing file is created, given the schema and filled with the sample
/// hierarchy. An existing file only gets `CREATE TABLE IF NOT EXISTS`.
///
/// # Side effects
/// - May create the file and insert sample rows.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let should_seed = !path.exists();
    log_open("file", || {
        open_file_with(path, should_seed, bootstrap_connection)
    })
}

/// Opens an in-memory database with schema and sample hierarchy.
pub fn open_db_in_memory() -> DbResult<Connection> {
    log_open("memory", || {
        let mut conn = Connection::open_in_memory()?;
        bootstrap_connection(&mut conn, true)?;
        Ok(conn)
    })
}

/// Opens an existing database file without creating it or changing schema.
///
/// Used by the importer; schema validation is the caller's job.
pub fn open_existing_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    log_open("existing", || {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        configure_connection(&conn)?;
        Ok(conn)
    })
}

fn log_open(mode: &str, open: impl FnOnce() -> DbResult<Connection>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    match open() {
        Ok(conn) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn open_file_with(
    path: &Path,
    created: bool,
    bootstrap: impl FnOnce(&mut Connection, bool) -> DbResult<()>,
) -> DbResult<Connection> {
    let mut conn = Connection::open(path)?;
    if let Err(err) = bootstrap(&mut conn, created) {
        drop(conn);
        if created {
            discard_created_file(path);
        }
        return Err(err);
    }
    Ok(conn)
}

fn discard_created_file(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        warn!(
            "event=db_open module=db status=cleanup_failed path={} error={}",
            path.display(),
            err
        );
    }
}

fn configure_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

fn bootstrap_connection(conn: &mut Connection, seed: bool) -> DbResult<()> {
    configure_connection(conn)?;
    apply_schema(conn)?;
    if seed {
        populate_sample_data(conn)?;
    }
    Ok(())
}
