//! Integration tests for the file-backed credential store.

use mailquery::store::credentials::{CredentialStore, Credentials, FileCredentialStore};

#[test]
fn test_save_load_clear_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("nested"));

    assert_eq!(store.load(), None);
    store.save("a@x.com", "pw").unwrap();
    assert!(store.path().ends_with("public_mail_credentials.json"));
    assert_eq!(store.load(), Some(Credentials::new("a@x.com", "pw")));

    // A second save replaces the record.
    store.save("b@x.com", "pw2").unwrap();
    assert_eq!(store.load(), Some(Credentials::new("b@x.com", "pw2")));

    store.clear().unwrap();
    assert_eq!(store.load(), None);
    assert!(!store.path().exists());
    // Clearing twice is fine.
    store.clear().unwrap();
}

#[test]
fn test_corrupt_record_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    std::fs::write(store.path(), "{not json").unwrap();

    assert_eq!(store.load(), None);
    assert!(!store.path().exists());
}

#[test]
fn test_incomplete_record_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    std::fs::write(store.path(), r#"{"email": "a@x.com", "password": ""}"#).unwrap();

    assert_eq!(store.load(), None);
    assert!(!store.path().exists());
}

#[test]
fn test_array_record_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    std::fs::write(store.path(), r#"["a@x.com","pw"]"#).unwrap();

    assert_eq!(store.load(), None);
    assert!(!store.path().exists());
}

#[cfg(unix)]
#[test]
fn test_record_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path());
    store.save("a@x.com", "pw").unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
