//! Local durable key-value storage
//!
//! The schedule snapshot and the theme preference each live under a fixed
//! key. [`SledStore`] keeps them in an embedded sled database in the user's
//! data directory; [`MemoryStore`] keeps them in memory for tests and dry runs.

use crate::error::{Result, TimetableError};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Key holding the serialized schedule snapshot
pub const SCHEDULE_KEY: &str = "tkb-schedule";

/// Key holding the theme preference
pub const THEME_KEY: &str = "tkb-theme";

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "TIMETABLER_DB";

/// Byte-oriented key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value, durably
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;
}

/// Sled-backed storage; clones share one open database
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
    path: PathBuf,
}

impl SledStore {
    /// Open the store in the default location
    ///
    /// `TIMETABLER_DB` overrides the location; otherwise the database lives in
    /// the platform data directory.
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var(DB_PATH_ENV) {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "timetabler", "timetabler").ok_or_else(|| {
            TimetableError::Storage("Could not determine data directory".to_string())
        })?;

        Self::new_with_path(proj_dirs.data_dir().join("schedule.db"))
    }

    /// Open the store at `path`, creating parent directories as needed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use timetabler::storage::SledStore;
    ///
    /// let store = SledStore::new_with_path("/tmp/timetabler/schedule.db").unwrap();
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TimetableError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(&path)
            .map_err(|e| TimetableError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!(path = %path.display(), "Opened schedule database");
        Ok(Self { db, path })
    }

    /// Location of the database
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| TimetableError::Storage(format!("Get failed: {}", e)))?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value)
            .map_err(|e| TimetableError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| TimetableError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// In-memory storage; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| TimetableError::Storage("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TimetableError::Storage("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
