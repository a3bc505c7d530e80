use rusqlite::Connection;
use worksync_core::db::{open_db, open_db_in_memory, DbError, SCHEMA_VERSION};
use worksync_core::{SlotStore, SqliteSlotStore};

#[test]
fn in_memory_database_gets_slots_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), SCHEMA_VERSION);
    assert_eq!(slot_columns(&conn), vec!["key", "value", "updated_at"]);
}

#[test]
fn reopening_database_keeps_slots_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("worksync.db");

    let first = open_db(&path).unwrap();
    SqliteSlotStore::new(&first)
        .write_slot("ws_tasks", "[]")
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), SCHEMA_VERSION);
    let value = SqliteSlotStore::new(&second)
        .read_slot("ws_tasks")
        .unwrap();
    assert_eq!(value.as_deref(), Some("[]"));
}

#[test]
fn newer_schema_is_rejected_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 7;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 7);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 7);
    assert!(slot_columns(&conn).is_empty());
}

#[test]
fn unopenable_path_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("worksync.db");

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::Open { path: ref failed, .. } if *failed == path));
    assert!(err.to_string().contains("worksync.db"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn slot_columns(conn: &Connection) -> Vec<String> {
    let mut statement = conn
        .prepare("SELECT name FROM pragma_table_info('slots') ORDER BY cid;")
        .unwrap();
    statement
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}
