use rusqlite::Connection;
use schemes_core::db::migrations::latest_version;
use schemes_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn fresh_database_reaches_latest_schema_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    let tables = object_names(&conn, "table");
    assert!(tables.contains(&"schemes".to_string()));
    assert!(tables.contains(&"steps".to_string()));
}

#[test]
fn steps_table_carries_its_scheme_index() {
    let conn = open_db_in_memory().unwrap();

    let indexes = object_names(&conn, "index");
    assert!(indexes.contains(&"idx_steps_scheme_id".to_string()));
}

#[test]
fn foreign_key_enforcement_is_switched_on() {
    let conn = open_db_in_memory().unwrap();

    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn reopening_a_migrated_file_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schemes.db");

    drop(open_db(&path).unwrap());

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    assert!(object_names(&conn, "table").contains(&"steps".to_string()));
}

#[test]
fn database_from_a_newer_build_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ahead.db");

    let raw = Connection::open(&path).unwrap();
    raw.pragma_update(None, "user_version", 99).unwrap();
    drop(raw);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 99);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn user_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn object_names(conn: &Connection, kind: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name;")
        .unwrap();
    let names = stmt
        .query_map([kind], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    names
}
