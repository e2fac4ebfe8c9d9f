use dashboard_core::store::migrations::latest_version;
use dashboard_core::store::{keys, open_store, open_store_in_memory, KeyValueStore, StoreError};
use dashboard_core::{Dashboard, EventDraft, TodoFilter};
use rusqlite::Connection;

#[test]
fn open_store_in_memory_applies_all_migrations() {
    let store = open_store_in_memory().unwrap();

    assert_eq!(schema_version(store.connection()), latest_version());
    let exists: i64 = store
        .connection()
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn values_survive_reopening_the_same_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.sqlite3");

    let mut store = open_store(&path).unwrap();
    store.set("theme", "\"ocean\"").unwrap();
    store.set("theme", "\"forest\"").unwrap();
    store.set("scratch", "1").unwrap();
    store.remove("scratch").unwrap();
    store.remove("never-written").unwrap();
    drop(store);

    let store = open_store(&path).unwrap();
    assert_eq!(store.get("theme").unwrap().as_deref(), Some("\"forest\""));
    assert_eq!(store.get("scratch").unwrap(), None);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_store(&path).unwrap_err() {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dashboard_state_round_trips_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.sqlite3");

    let mut dashboard = Dashboard::load(open_store(&path).unwrap());
    let milk = dashboard.add_todo("Buy milk").unwrap();
    dashboard.add_todo("Walk dog").unwrap();
    dashboard.toggle_todo(milk).unwrap();
    dashboard.add_note("Remember the keys").unwrap();
    dashboard
        .add_event(EventDraft::new("Dentist", "2024-03-05", "10am"))
        .unwrap();
    dashboard.set_dark_mode(true).unwrap();
    dashboard.set_font_size(18).unwrap();
    drop(dashboard);

    let reloaded = Dashboard::load(open_store(&path).unwrap());
    assert_eq!(reloaded.todos().len(), 2);
    assert_eq!(reloaded.todos()[0].id, milk);
    assert_eq!(reloaded.filter_todos(TodoFilter::Completed).len(), 1);
    assert_eq!(reloaded.notes()[0].text, "Remember the keys");
    assert_eq!(reloaded.events()[0].description, "10am");
    assert!(reloaded.settings().dark_mode);
    assert_eq!(reloaded.settings().font_size, 18);
}

#[test]
fn corrupt_keys_fall_back_independently() {
    let mut store = open_store_in_memory().unwrap();
    store.set(keys::TODOS, "{not json").unwrap();
    store
        .set(keys::NOTES, r#"[{"id":"5f0c6a4e-6c1e-4c53-9a43-0c4b7f3f7a11","text":"kept","timestamp":"2024-01-02T03:04:05.000Z"}]"#)
        .unwrap();
    store.set(keys::DARK_MODE, "maybe").unwrap();
    store.set(keys::THEME, "ocean").unwrap();

    let dashboard = Dashboard::load(store);

    assert!(dashboard.todos().is_empty());
    assert_eq!(dashboard.notes().len(), 1);
    assert_eq!(dashboard.notes()[0].text, "kept");
    assert!(!dashboard.settings().dark_mode);
    assert_eq!(dashboard.settings().theme, "ocean");
    assert!(dashboard.settings().notifications);
}

#[test]
fn legacy_entries_without_ids_get_stable_ids() {
    let mut store = open_store_in_memory().unwrap();
    store
        .set(
            keys::TODOS,
            r#"[{"text":"old task","completed":true},{"text":"older task"}]"#,
        )
        .unwrap();
    store
        .set(
            keys::EVENTS,
            r#"[{"title":"Trip","date":"2024-7-4T09:00"}]"#,
        )
        .unwrap();

    let first = Dashboard::load(store);
    let ids: Vec<_> = first.todos().iter().map(|todo| todo.id).collect();
    assert_eq!(ids.len(), 2);
    assert!(first.todos()[0].completed);
    assert!(!first.todos()[1].completed);
    assert_eq!(first.events()[0].date.to_string(), "2024-07-04");
    assert_eq!(first.events()[0].description, "");

    let second = Dashboard::load(first.into_store());
    let reloaded: Vec<_> = second.todos().iter().map(|todo| todo.id).collect();
    assert_eq!(reloaded, ids);
}

#[test]
fn persisted_shapes_match_the_browser_layout() {
    let mut dashboard = Dashboard::load(open_store_in_memory().unwrap());
    dashboard.add_todo("Buy milk").unwrap();
    dashboard
        .add_event(EventDraft::new("Trip", "2024-7-4", ""))
        .unwrap();

    let todos: serde_json::Value =
        serde_json::from_str(&dashboard.store().get(keys::TODOS).unwrap().unwrap()).unwrap();
    let todo = &todos[0];
    assert!(todo["id"].is_string());
    assert_eq!(todo["text"], "Buy milk");
    assert_eq!(todo["completed"], false);

    let events: serde_json::Value =
        serde_json::from_str(&dashboard.store().get(keys::EVENTS).unwrap().unwrap()).unwrap();
    assert_eq!(
        events,
        serde_json::json!([{ "title": "Trip", "date": "2024-07-04", "description": "" }])
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
