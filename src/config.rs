/// Runtime configuration
///
/// Values come from built-in defaults, optionally overridden by
/// environment variables and finally by command line flags.

use std::path::PathBuf;

use crate::error::{PhotoError, Result};

/// Key under which the whole collection is stored
pub const STORAGE_KEY: &str = "photoStorage";

/// Overrides the database location
pub const DB_PATH_ENV: &str = "PHOTO_VAULT_DB";

/// Caps the size of the stored collection, in bytes
pub const QUOTA_ENV: &str = "PHOTO_VAULT_QUOTA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite file holding the key-value table
    pub db_path: PathBuf,
    /// Maximum serialized size of the collection; `None` means unlimited
    pub quota_bytes: Option<usize>,
    pub storage_key: String,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(
            std::env::var(DB_PATH_ENV).ok(),
            std::env::var(QUOTA_ENV).ok(),
        )
    }

    fn from_vars(db_path: Option<String>, quota: Option<String>) -> Result<Self> {
        let db_path = match db_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_db_path()?,
        };

        let quota_bytes = match quota {
            Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<usize>().map_err(|_| {
                PhotoError::Config(format!("{} must be a byte count, got {:?}", QUOTA_ENV, raw))
            })?),
            _ => None,
        };

        Ok(Self {
            db_path,
            quota_bytes,
            storage_key: STORAGE_KEY.to_string(),
        })
    }

    pub fn with_db_path(mut self, db_path: PathBuf) -> Self {
        self.db_path = db_path;
        self
    }
}

/// Get the path where the database should be stored
///
/// - Linux: ~/.local/share/photo-vault/photo_vault.db
/// - macOS: ~/Library/Application Support/photo-vault/photo_vault.db
/// - Windows: %APPDATA%\photo-vault\photo_vault.db
fn default_db_path() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| PhotoError::Config("could not determine user data directory".into()))?;

    path.push("photo-vault");
    path.push("photo_vault.db");
    Ok(path)
}
