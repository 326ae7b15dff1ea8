//! File-backed key-value store for persisted client state.
//!
//! The dashboard keeps a handful of records between runs: the auth session,
//! UI preferences, and the offline demo collections. Each record is one JSON
//! file under the state directory, named `<prefix><key>.json`, wrapped in an
//! envelope carrying the write timestamp and an optional expiry:
//!
//! ```json
//! {"value": {...}, "timestamp": 1733220000000, "expiresAt": 1733306400000}
//! ```
//!
//! Reads are self-healing: an expired or unparseable record is evicted and
//! reported as absent. Writes report success as a `bool` and never panic -
//! a read-only disk degrades to "nothing persisted", not a crash.

pub mod preferences;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use preferences::Preferences;

/// Envelope wrapped around every stored value.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem<T> {
    value: T,
    timestamp: i64,
    expires_at: Option<i64>,
}

/// Namespaced persistent key-value store.
#[derive(Debug, Clone)]
pub struct StorageService {
    root: PathBuf,
    prefix: String,
}

impl StorageService {
    /// Create a store rooted at `root`; keys are namespaced with `prefix`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// The directory holding the persisted records.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `value` under `key`, optionally expiring after `ttl_hours`.
    ///
    /// Returns `false` when the record could not be written.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T, ttl_hours: Option<f64>) -> bool {
        let now = now_ms();
        #[allow(clippy::cast_possible_truncation)]
        let item = StoredItem {
            value,
            timestamp: now,
            expires_at: ttl_hours.map(|hours| now + (hours * 3_600_000.0) as i64),
        };

        let path = self.path_for(key);
        let result = std::fs::create_dir_all(&self.root)
            .and_then(|()| {
                let json = serde_json::to_string(&item)?;
                std::fs::write(&path, json)
            });

        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(key, error = %err, "failed to persist client state");
                false
            }
        }
    }

    /// Read the value stored under `key`.
    ///
    /// Absent, expired and corrupt records all read as `None`; the latter
    /// two are evicted on the way out.
    #[must_use]
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        let raw = std::fs::read_to_string(&path).ok()?;

        let item: StoredItem<T> = match serde_json::from_str(&raw) {
            Ok(item) => item,
            Err(err) => {
                tracing::warn!(key, error = %err, "evicting corrupt client-state record");
                self.remove_item(key);
                return None;
            }
        };

        if let Some(expires_at) = item.expires_at
            && now_ms() > expires_at
        {
            self.remove_item(key);
            return None;
        }

        Some(item.value)
    }

    /// Remove the record stored under `key`. Removing a missing key is fine.
    pub fn remove_item(&self, key: &str) {
        if let Err(err) = std::fs::remove_file(self.path_for(key))
            && err.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(key, error = %err, "failed to remove client-state record");
        }
    }

    /// Remove every record carrying this store's prefix.
    pub fn clear(&self) {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return;
        };
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(&self.prefix) {
                let _ = std::fs::remove_file(entry.path());
            }
        }
    }

    /// Probe whether the backing directory accepts writes.
    #[must_use]
    pub fn is_available(&self) -> bool {
        let probe = "__storage_test__";
        if !self.set_item(probe, &"test", None) {
            return false;
        }
        self.remove_item(probe);
        true
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{key}.json", self.prefix))
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> StorageService {
        let dir = std::env::temp_dir().join(format!("caphe-storage-{tag}-{}", uuid::Uuid::new_v4()));
        StorageService::new(dir, "caphe-admin-")
    }

    #[test]
    fn test_set_get_roundtrip() {
        let store = temp_store("roundtrip");
        assert!(store.set_item("greeting", &"xin chào", None));
        assert_eq!(store.get_item::<String>("greeting").as_deref(), Some("xin chào"));
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = temp_store("missing");
        assert_eq!(store.get_item::<String>("nope"), None);
    }

    #[test]
    fn test_expired_record_is_evicted() {
        let store = temp_store("expired");
        // A TTL in the past: expiresAt is already behind the clock.
        assert!(store.set_item("auth", &"token", Some(-1.0)));
        assert_eq!(store.get_item::<String>("auth"), None);
        // The file itself was removed, not just filtered.
        assert!(!store.root().join("caphe-admin-auth.json").exists());
    }

    #[test]
    fn test_unexpired_ttl_record_survives() {
        let store = temp_store("ttl");
        assert!(store.set_item("auth", &"token", Some(24.0)));
        assert_eq!(store.get_item::<String>("auth").as_deref(), Some("token"));
    }

    #[test]
    fn test_corrupt_record_self_heals() {
        let store = temp_store("corrupt");
        assert!(store.set_item("auth", &"token", None));
        std::fs::write(store.root().join("caphe-admin-auth.json"), "{not json").unwrap();
        assert_eq!(store.get_item::<String>("auth"), None);
        assert!(!store.root().join("caphe-admin-auth.json").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = temp_store("remove");
        store.remove_item("never-set");
        assert!(store.set_item("k", &1, None));
        store.remove_item("k");
        store.remove_item("k");
        assert_eq!(store.get_item::<i32>("k"), None);
    }

    #[test]
    fn test_clear_only_touches_prefixed_files() {
        let store = temp_store("clear");
        assert!(store.set_item("a", &1, None));
        assert!(store.set_item("b", &2, None));
        std::fs::write(store.root().join("unrelated.json"), "{}").unwrap();

        store.clear();

        assert_eq!(store.get_item::<i32>("a"), None);
        assert_eq!(store.get_item::<i32>("b"), None);
        assert!(store.root().join("unrelated.json").exists());
    }

    #[test]
    fn test_is_available() {
        let store = temp_store("avail");
        assert!(store.is_available());
    }
}
