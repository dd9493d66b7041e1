use std::fs;

use tabmap_core::{FileSessionStore, ImportSession, SessionError, SessionStore};
use tabmap_ingest::FileType;
use tempfile::TempDir;

#[test]
fn file_store_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileSessionStore::new(dir.path().join("sessions")).expect("store");

    let mut session = ImportSession::new("customers.xlsx", FileType::Spreadsheet);
    session.select_schema("Customer");
    session.update_mapping("E-mail", Some("email"));
    session.update_mapping("Notes", None);
    store.save(&session).expect("save");

    let path = store.base_dir().join(format!("{}.json", session.id));
    let content = fs::read_to_string(&path).expect("read");
    assert!(content.contains("\"file_type\": \"excel\""));

    let loaded = store.load(session.id).expect("load").expect("present");
    assert_eq!(loaded, session);
    assert_eq!(loaded.mapping.target_for("E-mail"), Some("email"));
    assert_eq!(loaded.mapping.unmapped_columns().collect::<Vec<_>>(), ["Notes"]);
}

#[test]
fn file_store_list_and_delete() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileSessionStore::new(dir.path()).expect("store");
    let first = ImportSession::new("a.csv", FileType::Delimited);
    let second = ImportSession::new("b.csv", FileType::Delimited);
    store.save(&first).expect("save");
    store.save(&second).expect("save");
    fs::write(dir.path().join("README.txt"), "not a session").expect("write");

    let names: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|s| s.original_filename)
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"a.csv".to_string()));

    assert!(store.delete(first.id).expect("delete"));
    assert!(!store.delete(first.id).expect("delete again"));
    assert!(store.load(first.id).expect("load").is_none());
    assert!(matches!(
        store.get(first.id),
        Err(SessionError::NotFound { .. })
    ));
}

#[test]
fn malformed_session_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let store = FileSessionStore::new(dir.path()).expect("store");
    let session = ImportSession::new("a.csv", FileType::Delimited);
    fs::write(store.base_dir().join(format!("{}.json", session.id)), "{").expect("write");
    assert!(matches!(
        store.load(session.id),
        Err(SessionError::Json { .. })
    ));
}
