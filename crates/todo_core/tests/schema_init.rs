use rusqlite::Connection;
use todo_core::db::migrations::{initialize_schema, latest_version};
use todo_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_both_tables() {
    let store = open_db_in_memory().unwrap();
    let result = store
        .execute(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('groups', 'todos') ORDER BY name",
            &[],
        )
        .unwrap();
    let names: Vec<&str> = result
        .rows
        .iter()
        .map(|row| row.get_text("name").unwrap())
        .collect();
    assert_eq!(names, ["groups", "todos"]);
}

#[test]
fn initializing_twice_is_a_no_op() {
    let mut conn = Connection::open_in_memory().unwrap();
    initialize_schema(&mut conn).unwrap();
    initialize_schema(&mut conn).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(table_count(&conn, "groups"), 1);
    assert_eq!(table_count(&conn, "todos"), 1);
}

#[test]
fn store_reinitialization_keeps_existing_rows() {
    let store = open_db_in_memory().unwrap();
    store
        .execute("INSERT INTO groups (name) VALUES (?)", &["Work".to_string().into()])
        .unwrap();

    store.initialize_schema().unwrap();

    let rows = store.execute("SELECT * FROM groups", &[]).unwrap().rows;
    assert_eq!(rows.len(), 1);
}

#[test]
fn reopening_same_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tododb.db");

    let first = open_db(&path).unwrap();
    first
        .execute("INSERT INTO groups (name) VALUES ('Home')", &[])
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    let rows = second.execute("SELECT * FROM groups", &[]).unwrap().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_text("name"), Some("Home"));
}

#[test]
fn legacy_database_without_schema_version_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE groups (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
         CREATE TABLE todos (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT, description TEXT, status TEXT, groupId INTEGER, FOREIGN KEY (groupId) REFERENCES groups(id));
         INSERT INTO groups (name) VALUES ('Errands');
         INSERT INTO todos (title, description, status, groupId) VALUES ('Buy milk', '', 'pending', 1);",
    )
    .unwrap();
    drop(conn);

    let store = open_db(&path).unwrap();
    let rows = store.execute("SELECT * FROM todos", &[]).unwrap().rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get_text("title"), Some("Buy milk"));

    drop(store);
    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        }) => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema should be rejected"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_count(conn: &Connection, table_name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}
