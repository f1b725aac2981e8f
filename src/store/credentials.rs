//! Saved login for auto-login on the next start.
//!
//! A single `{email, password}` record lives under one well-known key. The
//! record is a convenience cache, not a secret store: no encryption, no
//! expiry. A record that cannot be decoded is removed on read.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MailError, Result};

/// Well-known storage key of the credential record.
pub const STORAGE_KEY: &str = "public_mail_credentials";

/// Email and password as typed on the login form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields present.
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

// Keep the password out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Persistence capability for the saved login.
pub trait CredentialStore {
    /// Write the record, replacing any previous one.
    fn save(&self, email: &str, password: &str) -> Result<()>;

    /// Read the record. Missing, undecodable or incomplete records yield
    /// `None`; the latter two are also removed from storage.
    fn load(&self) -> Option<Credentials>;

    /// Remove the record. Removing a missing record is not an error.
    fn clear(&self) -> Result<()>;
}

/// Decode a stored value; `None` for anything but a complete record.
///
/// Only a JSON object qualifies. Serde's derived struct decoder would also
/// take a `[email, password]` array.
fn decode(raw: &str) -> Option<Credentials> {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    let field = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_owned);
    let creds = Credentials::new(field("email")?, field("password")?);
    creds.is_complete().then_some(creds)
}

fn encode(email: &str, password: &str) -> Result<String> {
    serde_json::to_string(&Credentials::new(email, password))
        .map_err(|e| MailError::Corrupt(e.to_string()))
}

// ── File-backed store ───────────────────────────────────────────

/// Stores the record as `<dir>/public_mail_credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store inside `dir` (created on first save).
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    /// Location of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, email: &str, password: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MailError::storage(parent, e))?;
        }
        let contents = encode(email, password)?;
        std::fs::write(&self.path, contents).map_err(|e| MailError::storage(&self.path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&self.path, perms) {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to restrict credential file permissions");
            }
        }

        tracing::debug!(path = %self.path.display(), "Saved credentials");
        Ok(())
    }

    fn load(&self) -> Option<Credentials> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read credentials");
                return None;
            }
        };

        let creds = decode(&raw);
        if creds.is_none() {
            tracing::warn!(path = %self.path.display(), "Discarding corrupt credential record");
            if let Err(e) = self.clear() {
                tracing::warn!(error = %e, "Failed to remove corrupt credential record");
            }
        }
        creds
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MailError::storage(&self.path, e)),
        }
    }
}

// ── In-memory store ─────────────────────────────────────────────

/// Process-local store holding the raw encoded value, used when saving to
/// disk is disabled and in tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an arbitrary raw value, e.g. a corrupt one.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw stored value, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a valid Option.
        self.value.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, email: &str, password: &str) -> Result<()> {
        *self.slot() = Some(encode(email, password)?);
        Ok(())
    }

    fn load(&self) -> Option<Credentials> {
        let mut slot = self.slot();
        let creds = slot.as_deref().and_then(decode);
        if creds.is_none() {
            *slot = None;
        }
        creds
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load(), None);
        store.save("a@x.com", "pw").unwrap();
        assert_eq!(store.load(), Some(Credentials::new("a@x.com", "pw")));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_memory_save_overwrites() {
        let store = MemoryCredentialStore::new();
        store.save("a@x.com", "one").unwrap();
        store.save("b@x.com", "two").unwrap();
        assert_eq!(store.load(), Some(Credentials::new("b@x.com", "two")));
    }

    #[test]
    fn test_memory_corrupt_value_is_cleared() {
        let store = MemoryCredentialStore::with_raw("not json");
        assert_eq!(store.load(), None);
        assert_eq!(store.raw(), None);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_incomplete_record_is_cleared() {
        for raw in [
            r#"{"email":"a@x.com","password":""}"#,
            r#"{"email":"","password":"pw"}"#,
            r#"{"email":"a@x.com"}"#,
            r#"["a@x.com","pw"]"#,
            r#"{"email":"a@x.com","password":42}"#,
            r#""a@x.com""#,
        ] {
            let store = MemoryCredentialStore::with_raw(raw);
            assert_eq!(store.load(), None, "{raw}");
            assert_eq!(store.raw(), None, "{raw}");
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("a@x.com", "secret");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("a@x.com"));
        assert!(!dbg.contains("secret"));
    }

    #[test]
    fn test_file_path_uses_storage_key() {
        let store = FileCredentialStore::new("/tmp/mq");
        assert_eq!(
            store.path(),
            Path::new("/tmp/mq/public_mail_credentials.json")
        );
    }
}
