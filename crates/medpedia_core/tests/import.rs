use medpedia_core::{StoreError, TopicStore};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

fn write_db(path: &Path, sql: &str) {
    Connection::open(path).unwrap().execute_batch(sql).unwrap();
}

fn valid_db(dir: &Path, file_name: &str, root_name: &str) -> PathBuf {
    let path = dir.join(file_name);
    write_db(
        &path,
        &format!(
            "CREATE TABLE topics (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                parent_id INTEGER REFERENCES topics(id)
            );
            INSERT INTO topics (id, name, description, parent_id) VALUES
                (1, '{root_name}', 'imported root', NULL),
                (2, 'Imported Child', 'line one\nline two', 1);"
        ),
    );
    path
}

fn root_names(store: &TopicStore) -> Vec<String> {
    store
        .fetch_children(None)
        .unwrap()
        .into_iter()
        .map(|topic| topic.name)
        .collect()
}

#[test]
fn connect_switches_active_store_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = valid_db(dir.path(), "atlas.sqlite", "Pharmacology");
    let mut store = TopicStore::open_in_memory().unwrap();

    store.connect(&path).unwrap();

    assert!(store.is_connected());
    assert_eq!(store.active_path(), Some(path.as_path()));
    assert_eq!(root_names(&store), ["Pharmacology"]);
    let child = store.fetch_topic(2).unwrap().unwrap();
    assert_eq!(child.parent_id, Some(1));
}

#[test]
fn connect_from_disconnected_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = valid_db(dir.path(), "atlas.db", "Pathology");
    let mut store = TopicStore::disconnected();

    store.connect(&path).unwrap();
    assert_eq!(root_names(&store), ["Pathology"]);
}

#[test]
fn missing_file_is_not_found_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TopicStore::open_in_memory().unwrap();
    let before = root_names(&store);

    let missing = dir.path().join("missing.db");
    let err = store.connect(&missing).unwrap_err();

    assert!(matches!(err, StoreError::NotFound(ref path) if path == &missing));
    assert!(!missing.exists());
    assert_eq!(root_names(&store), before);
}

#[test]
fn database_without_topics_table_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let previous = valid_db(dir.path(), "previous.db", "Anatomy");
    let foreign = dir.path().join("foreign.db");
    write_db(&foreign, "CREATE TABLE patients (id INTEGER PRIMARY KEY);");

    let mut store = TopicStore::disconnected();
    store.connect(&previous).unwrap();

    let err = store.connect(&foreign).unwrap_err();
    assert!(matches!(err, StoreError::InvalidSchema(_)));
    assert_eq!(store.active_path(), Some(previous.as_path()));
    assert_eq!(root_names(&store), ["Anatomy"]);
}

#[test]
fn topics_table_missing_column_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let partial = dir.path().join("partial.db");
    write_db(
        &partial,
        "CREATE TABLE topics (id INTEGER PRIMARY KEY, name TEXT NOT NULL);",
    );
    let mut store = TopicStore::open_in_memory().unwrap();

    let err = store.connect(&partial).unwrap_err();
    match err {
        StoreError::InvalidSchema(reason) => assert!(reason.contains("description")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_connected());
    assert_eq!(store.active_path(), None);
}

#[test]
fn non_database_file_is_rejected_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("notes.sqlite3");
    std::fs::write(&text, "this is not a sqlite database, just plain text. ".repeat(8)).unwrap();
    let mut store = TopicStore::open_in_memory().unwrap();
    let before = root_names(&store);

    let err = store.connect(&text).unwrap_err();

    assert!(matches!(err, StoreError::InvalidSchema(_)));
    assert_eq!(store.active_path(), None);
    assert_eq!(root_names(&store), before);
}

#[test]
fn blank_name_beyond_first_row_is_rejected_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let previous = valid_db(dir.path(), "previous.db", "Anatomy");
    let blank = dir.path().join("blank.db");
    write_db(
        &blank,
        "CREATE TABLE topics (
            id INTEGER PRIMARY KEY,
            name TEXT,
            description TEXT,
            parent_id INTEGER
        );
        INSERT INTO topics (id, name, description, parent_id) VALUES
            (1, 'A', 'first', NULL),
            (2, '', 'second', 1);",
    );
    let mut store = TopicStore::disconnected();
    store.connect(&previous).unwrap();

    let err = store.connect(&blank).unwrap_err();

    assert!(matches!(err, StoreError::InvalidData(ref message) if message.contains("topic 2")));
    assert_eq!(store.active_path(), Some(previous.as_path()));
    assert_eq!(root_names(&store), ["Anatomy"]);
    assert_eq!(store.fetch_children(Some(1)).unwrap().len(), 1);
}

#[test]
fn topics_view_with_required_columns_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("view.db");
    write_db(
        &path,
        "CREATE TABLE entries (
            entry_id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL,
            parent INTEGER
        );
        INSERT INTO entries (entry_id, title, body, parent) VALUES
            (1, 'Histology', 'tissues', NULL),
            (2, 'Epithelium', 'covering tissue', 1);
        CREATE VIEW topics AS
            SELECT entry_id AS id, title AS name, body AS description, parent AS parent_id
            FROM entries;",
    );
    let mut store = TopicStore::disconnected();

    store.connect(&path).unwrap();

    assert_eq!(root_names(&store), ["Histology"]);
    let forest = store.materialize_tree().unwrap();
    assert_eq!(forest[0].children[0].name(), "Epithelium");
}

#[test]
fn directory_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TopicStore::disconnected();

    let err = store.connect(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(!store.is_connected());
}

#[test]
fn import_does_not_seed_or_alter_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let path = valid_db(dir.path(), "clean.db", "Only Root");
    let mut store = TopicStore::disconnected();

    store.connect(&path).unwrap();
    store.close();

    let conn = Connection::open(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM topics;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 2);
}
