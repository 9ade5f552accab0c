//! External database import validation.
//!
//! # Responsibility
//! - Decide whether a user-chosen file can become the active database.
//! - Describe the file picker filters offered for import.
//!
//! # Invariants
//! - The candidate file is never created, migrated or seeded.
//! - A rejected candidate connection is dropped before the error returns.
//! - File extensions are advisory; validity comes from schema probing.

use crate::db::open_existing_db;
use crate::repo::topic_repo::SqliteTopicRepository;
use crate::service::topic_store::{StoreError, StoreResult};
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Extensions offered by the import file picker.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

/// One entry of the import file picker filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// Extensions without leading dot; `*` matches any file.
    pub extensions: &'static [&'static str],
}

/// Returns picker filters: database files first, then an all-files fallback.
pub fn import_file_filters() -> [FileFilter; 2] {
    [
        FileFilter {
            label: "Database files",
            extensions: &SUPPORTED_EXTENSIONS,
        },
        FileFilter {
            label: "All files",
            extensions: &["*"],
        },
    ]
}

/// Returns whether `path` carries one of [`SUPPORTED_EXTENSIONS`].
pub fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Opens and validates a candidate database.
///
/// # Errors
/// - `NotFound` when no file exists at `path`.
/// - `InvalidSchema` when the `topics` table or one of its columns is
///   missing, or the file is not a SQLite database.
/// - `InvalidData` when any row has a blank `name`.
/// - `Store` for other engine failures during open or probe.
pub fn validate_candidate(path: &Path) -> StoreResult<Connection> {
    info!(
        "event=db_import module=import status=start path={} known_extension={}",
        path.display(),
        has_recognized_extension(path)
    );

    if !path.is_file() {
        warn!(
            "event=db_import module=import status=error error_code=not_found path={}",
            path.display()
        );
        return Err(StoreError::NotFound(path.to_path_buf()));
    }

    match open_and_probe(path) {
        Ok(conn) => Ok(conn),
        Err(err) => {
            warn!(
                "event=db_import module=import status=error path={} error={}",
                path.display(),
                err
            );
            Err(err)
        }
    }
}

fn open_and_probe(path: &Path) -> StoreResult<Connection> {
    let conn = open_existing_db(path)?;
    SqliteTopicRepository::try_new(&conn)?.probe()?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::{has_recognized_extension, import_file_filters, SUPPORTED_EXTENSIONS};
    use std::path::Path;

    #[test]
    fn recognized_extensions_ignore_case() {
        assert!(has_recognized_extension(Path::new("atlas.DB")));
        assert!(has_recognized_extension(Path::new("/tmp/atlas.sqlite3")));
        assert!(!has_recognized_extension(Path::new("atlas.txt")));
        assert!(!has_recognized_extension(Path::new("atlas")));
    }

    #[test]
    fn filters_end_with_all_files_fallback() {
        let filters = import_file_filters();
        assert_eq!(filters[0].extensions, &SUPPORTED_EXTENSIONS);
        assert_eq!(filters[1].extensions, &["*"]);
    }
}
