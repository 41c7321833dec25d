use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{info, warn};

use super::data::PhotoRecord;
use crate::config::Config;
use crate::error::{PhotoError, Result};

/// Durable persistence for the photo collection.
///
/// The whole collection lives under one key as a JSON array, most recent
/// photo first. `save` replaces that value in a single write; `load` never
/// fails, absent or unreadable data is an empty collection.
pub trait PhotoStore {
    fn save(&mut self, photos: &[PhotoRecord]) -> Result<()>;

    fn load(&self) -> Vec<PhotoRecord>;

    /// Size in bytes of the currently stored value (0 when nothing is stored)
    fn stored_size(&self) -> usize;
}

/// Serialize the collection and check it against the quota.
fn serialize(photos: &[PhotoRecord], quota: Option<usize>) -> Result<String> {
    let json = serde_json::to_string(photos)?;
    if let Some(quota) = quota {
        if json.len() > quota {
            return Err(PhotoError::QuotaExceeded {
                needed: json.len(),
                quota,
            });
        }
    }
    Ok(json)
}

/// Parse a stored value, treating anything unreadable as "no data".
fn deserialize(raw: Option<String>) -> Vec<PhotoRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let photos: Vec<PhotoRecord> = match serde_json::from_str(&raw) {
        Ok(photos) => photos,
        Err(e) => {
            warn!("Stored photo collection is unreadable, starting empty: {}", e);
            return Vec::new();
        }
    };

    // Keep the first occurrence of every id
    let mut seen = HashSet::new();
    let total = photos.len();
    let photos: Vec<PhotoRecord> = photos
        .into_iter()
        .filter(|photo| seen.insert(photo.id.clone()))
        .collect();

    if photos.len() != total {
        warn!("Dropped {} stored photos with duplicate ids", total - photos.len());
    }

    photos
}

/// SQLite-backed key-value store.
pub struct SqliteStore {
    conn: Connection,
    db_path: PathBuf,
    key: String,
    quota: Option<usize>,
}

impl SqliteStore {
    /// Open (or create) the database described by `config`.
    pub fn open(config: &Config) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.db_path)?;
        info!("📁 Database initialized at: {}", config.db_path.display());

        let store = Self {
            conn,
            db_path: config.db_path.clone(),
            key: config.storage_key.clone(),
            quota: config.quota_bytes,
        };
        store.init_schema()?;

        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn read_raw(&self) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![self.key], |row| {
                row.get(0)
            })
            .optional()
    }

    /// Overwrite the stored value verbatim, bypassing serialization.
    pub fn write_raw(&self, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![self.key, value],
        )?;
        Ok(())
    }
}

impl PhotoStore for SqliteStore {
    fn save(&mut self, photos: &[PhotoRecord]) -> Result<()> {
        let json = serialize(photos, self.quota)?;
        self.write_raw(&json)
    }

    fn load(&self) -> Vec<PhotoRecord> {
        match self.read_raw() {
            Ok(raw) => deserialize(raw),
            Err(e) => {
                warn!("Failed to read stored photos, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    fn stored_size(&self) -> usize {
        self.read_raw().ok().flatten().map_or(0, |raw| raw.len())
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("db_path", &self.db_path)
            .field("key", &self.key)
            .finish()
    }
}

/// In-memory store with the same semantics, for tests and throwaway sessions.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    key: String,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            key: crate::config::STORAGE_KEY.to_string(),
            quota: None,
        }
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    pub fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    pub fn raw(&self) -> Option<&str> {
        self.values.get(&self.key).map(String::as_str)
    }

    /// Overwrite the stored value verbatim, bypassing serialization.
    pub fn write_raw(&mut self, value: impl Into<String>) {
        self.values.insert(self.key.clone(), value.into());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoStore for MemoryStore {
    fn save(&mut self, photos: &[PhotoRecord]) -> Result<()> {
        let json = serialize(photos, self.quota)?;
        self.values.insert(self.key.clone(), json);
        Ok(())
    }

    fn load(&self) -> Vec<PhotoRecord> {
        deserialize(self.raw().map(str::to_string))
    }

    fn stored_size(&self) -> usize {
        self.raw().map_or(0, str::len)
    }
}
