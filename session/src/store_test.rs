use super::*;

fn budi() -> User {
    User {
        id: "1".to_owned(),
        name: "Budi".to_owned(),
        email: Some("budi@ajarin.id".to_owned()),
        role: Some("student".to_owned()),
        avatar: None,
    }
}

// =============================================================
// MemoryTokenStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryTokenStore::new();
    assert!(store.is_empty());
    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user_data(), None);
}

#[test]
fn memory_store_clear_all_removes_both() {
    let store = MemoryTokenStore::with_credential("abc", budi());
    assert_eq!(store.get_token().as_deref(), Some("abc"));
    store.clear_all().unwrap();
    assert!(store.is_empty());
}

#[test]
fn arc_store_delegates() {
    let store = Arc::new(MemoryTokenStore::new());
    let shared: Arc<MemoryTokenStore> = Arc::clone(&store);
    shared.set_token("xyz").unwrap();
    assert_eq!(store.get_token().as_deref(), Some("xyz"));
}

// =============================================================
// FileTokenStore
// =============================================================

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("ajarin"));
    store.set_token("abc").unwrap();
    store.set_user_data(&budi()).unwrap();

    let reopened = FileTokenStore::new(dir.path().join("ajarin"));
    assert_eq!(reopened.get_token().as_deref(), Some("abc"));
    assert_eq!(reopened.get_user_data(), Some(budi()));
}

#[test]
fn file_store_missing_files_read_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path());
    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user_data(), None);
}

#[test]
fn file_store_blank_token_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("token"), "  \n").unwrap();
    let store = FileTokenStore::new(dir.path());
    assert_eq!(store.get_token(), None);
}

#[test]
fn file_store_corrupt_user_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("user.json"), "{not json").unwrap();
    let store = FileTokenStore::new(dir.path());
    assert_eq!(store.get_user_data(), None);
}

#[test]
fn file_store_clear_all_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path());
    store.set_token("abc").unwrap();
    store.set_user_data(&budi()).unwrap();

    store.clear_all().unwrap();
    store.clear_all().unwrap();

    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_user_data(), None);
}

#[cfg(unix)]
#[test]
fn file_store_token_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path());
    store.set_token("abc").unwrap();
    let mode = std::fs::metadata(dir.path().join("token")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
