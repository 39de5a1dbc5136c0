//! Unit tests for the ReadAssist database layer (connection + migrations).

use rusqlite::Connection;
use tempfile::TempDir;

use readassist::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use readassist::database::Database;
use readassist::services::preference_store::{PreferenceStore, SqlitePreferenceStore};

#[test]
fn test_open_in_memory_reaches_current_version() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_preferences_table_is_keyed_by_origin() {
    let db = Database::open_in_memory().unwrap();
    let conn = db.connection();
    conn.execute(
        "INSERT INTO preferences (origin, key, value, updated_at) VALUES ('a', 'k', 'true', 0)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO preferences (origin, key, value, updated_at) VALUES ('b', 'k', 'false', 0)",
        [],
    )
    .unwrap();
    let dup = conn.execute(
        "INSERT INTO preferences (origin, key, value, updated_at) VALUES ('a', 'k', 'x', 0)",
        [],
    );
    assert!(dup.is_err(), "(origin, key) must be unique");
}

#[test]
fn test_migrations_are_idempotent_on_reopen() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prefs.db");
    {
        let db = Database::open(&path).unwrap();
        let mut store = SqlitePreferenceStore::new(db, "https://en.wikipedia.org");
        store.set("tamWikiHideControls", "true").unwrap();
    }
    let db = Database::open(&path).unwrap();
    let versions: i32 = db
        .connection()
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(versions, CURRENT_SCHEMA_VERSION);
    let store = SqlitePreferenceStore::new(db, "https://en.wikipedia.org");
    assert_eq!(store.get("tamWikiHideControls").unwrap().as_deref(), Some("true"));
}

#[test]
fn test_v1_rows_move_to_empty_origin() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("legacy.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at INTEGER NOT NULL, description TEXT NOT NULL);
             INSERT INTO schema_version VALUES (1, 0, 'Preferences key-value table');
             CREATE TABLE preferences (key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at INTEGER NOT NULL);
             INSERT INTO preferences VALUES ('tamWikiHideAppearance', 'true', 0);",
        )
        .unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(get_schema_version(db.connection()), 2);
    let store = SqlitePreferenceStore::new(db, "");
    assert_eq!(store.get("tamWikiHideAppearance").unwrap().as_deref(), Some("true"));
}

#[test]
fn test_stores_with_different_origins_do_not_share_keys() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("prefs.db");
    let mut a = SqlitePreferenceStore::new(Database::open(&path).unwrap(), "https://a.example");
    a.set("k", "true").unwrap();
    let b = SqlitePreferenceStore::new(Database::open(&path).unwrap(), "https://b.example");
    assert_eq!(b.get("k").unwrap(), None);
    assert_eq!(a.get("k").unwrap().as_deref(), Some("true"));
}
