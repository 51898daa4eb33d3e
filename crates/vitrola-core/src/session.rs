//! Persisted session entries.
//!
//! The session is two independent key/value entries: the raw auth token and the
//! JSON-serialized user profile. On disk they live in `<base>/session.json` with
//! restricted permissions (0600). Tokens are never logged.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

use crate::config::paths;
use crate::models::UserProfile;

/// Key of the raw auth token entry.
pub const TOKEN_KEY: &str = "@Auth.Token";
/// Key of the serialized profile entry.
pub const PROFILE_KEY: &str = "@Auth.Data";

/// Key/value storage for the session entries.
pub trait SessionStore: Send + Sync {
    /// Reads an entry.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes an entry, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes an entry. Removing a missing entry is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Reads the persisted profile.
///
/// Absent, unreadable or malformed data yields `None`; the cause is logged at
/// debug level only.
pub fn read_profile(store: &dyn SessionStore) -> Option<UserProfile> {
    let raw = match store.get(PROFILE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            tracing::debug!(error = %err, "failed to read persisted profile");
            return None;
        }
    };

    match serde_json::from_str::<UserProfile>(&raw) {
        Ok(profile) => Some(profile),
        Err(err) => {
            tracing::debug!(error = %err, "ignoring malformed persisted profile");
            None
        }
    }
}

/// Reads the persisted token, treating empty values and read failures as absent.
pub fn read_token(store: &dyn SessionStore) -> Option<String> {
    match store.get(TOKEN_KEY) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(err) => {
            tracing::debug!(error = %err, "failed to read persisted token");
            None
        }
    }
}

/// Session entries stored in a JSON file.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    /// Creates a store backed by `<vitrola home>/session.json`.
    pub fn new() -> Self {
        Self::at(paths::session_path())
    }

    /// Creates a store backed by a specific file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session from {}", self.path.display()))?;

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %err,
                    "session file is malformed; starting empty"
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents =
            serde_json::to_string_pretty(entries).context("Failed to serialize session")?;

        // Write a sibling temp file, then rename it over the target.
        let tmp_path = self.path.with_extension("json.tmp");
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&tmp_path)
            .with_context(|| format!("Failed to open {} for writing", tmp_path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", tmp_path.display()))?;
        file.sync_all()
            .with_context(|| format!("Failed to flush {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> (T, bool),
    ) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_poisoned| anyhow!("session store lock poisoned"))?;
        let mut entries = self.load_entries()?;
        let (out, dirty) = f(&mut entries);
        if dirty {
            self.save_entries(&entries)?;
        }
        Ok(out)
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_entries(|entries| (entries.get(key).cloned(), false))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
            ((), true)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_entries(|entries| {
            let removed = entries.remove(key).is_some();
            ((), removed)
        })
    }
}

/// Session entries kept in process memory.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_poisoned| anyhow!("session store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_poisoned| anyhow!("session store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_poisoned| anyhow!("session store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::at(dir.path().join("session.json"));

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.set(TOKEN_KEY, "tok").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));

        // A fresh handle sees the persisted value.
        let reopened = FileSessionStore::at(dir.path().join("session.json"));
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_uses_fixed_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::at(&path);
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(PROFILE_KEY, r#"{"id":1}"#).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["@Auth.Token"], "tok");
        assert_eq!(raw["@Auth.Data"], r#"{"id":1}"#);
    }

    #[test]
    fn test_file_writes_replace_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ truncated").unwrap();

        let store = FileSessionStore::at(&path);
        store.set(TOKEN_KEY, "tok").unwrap();
        store.set(PROFILE_KEY, r#"{"id":1}"#).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let entries: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[TOKEN_KEY], "tok");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileSessionStore::at(&path).set(TOKEN_KEY, "tok").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_malformed_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::at(&path);
        assert_eq!(store.get(PROFILE_KEY).unwrap(), None);
        assert_eq!(read_profile(&store), None);
    }

    #[test]
    fn test_read_profile_variants() {
        let store = MemorySessionStore::new();
        assert_eq!(read_profile(&store), None);

        store.set(PROFILE_KEY, "{}").unwrap();
        let empty = read_profile(&store).unwrap();
        assert!(!empty.is_identified());

        store.set(PROFILE_KEY, "{broken").unwrap();
        assert_eq!(read_profile(&store), None);

        store
            .set(
                PROFILE_KEY,
                r#"{"id":3,"name":"A","email":"a@b.com","password":"x"}"#,
            )
            .unwrap();
        let profile = read_profile(&store).unwrap();
        assert!(profile.is_identified());
        assert_eq!(profile.id, 3);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let store = MemorySessionStore::new();
        store.set(TOKEN_KEY, "").unwrap();
        assert_eq!(read_token(&store), None);
    }
}
