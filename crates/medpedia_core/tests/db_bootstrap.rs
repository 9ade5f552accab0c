use medpedia_core::db::seed::{count_seed_topics, SAMPLE_TOPICS};
use medpedia_core::db::{open_db, open_db_in_memory, DEFAULT_DB_FILE_NAME};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_topics_table_with_sample_rows() {
    let conn = open_db_in_memory().unwrap();

    assert_table_exists(&conn, "topics");
    assert_eq!(topic_count(&conn), count_seed_topics(SAMPLE_TOPICS));
}

#[test]
fn fresh_file_is_seeded_once_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DB_FILE_NAME);

    let conn_first = open_db(&path).unwrap();
    let seeded = topic_count(&conn_first);
    assert_eq!(seeded, count_seed_topics(SAMPLE_TOPICS));
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(topic_count(&conn_second), seeded);

    let terminology_roots: i64 = conn_second
        .query_row(
            "SELECT COUNT(*) FROM topics WHERE name = 'Terminology' AND parent_id IS NULL;",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(terminology_roots, 1);
}

#[test]
fn existing_file_without_rows_is_not_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE unrelated (id INTEGER);")
        .unwrap();

    let conn = open_db(&path).unwrap();
    assert_table_exists(&conn, "topics");
    assert_eq!(topic_count(&conn), 0);
}

#[test]
fn foreign_keys_are_enforced_on_opened_connections() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO topics (name, description, parent_id) VALUES ('Orphan', 'x', 999999);",
        [],
    );
    assert!(result.is_err());
}

fn topic_count(conn: &Connection) -> usize {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM topics;", [], |row| row.get(0))
        .unwrap();
    count as usize
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
