//! Durable storage for session records, settings, and preferences.
//!
//! Two backing mediums live behind the [`RecordStore`] trait: the embedded
//! SQLite engine ([`SqliteStore`]) and a single JSON document
//! ([`JsonFileStore`]). [`open_store`] probes for SQLite at process start
//! and falls back to the file store; callers never branch on the medium.

pub mod database;
pub mod file;

pub use database::SqliteStore;
pub use file::JsonFileStore;

use std::path::PathBuf;

use crate::error::Result;
use crate::session::MeditationSession;

/// Key/value namespace, keeping settings apart from miscellaneous
/// preferences. Maps to separate tables on the tabular medium and to
/// distinct key prefixes on the key/value medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvNamespace {
    Settings,
    Preferences,
}

impl KvNamespace {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            KvNamespace::Settings => "settings",
            KvNamespace::Preferences => "prefs",
        }
    }
}

/// Durable key-addressed storage.
///
/// Contract shared by every implementation: writes are durable before the
/// call returns, a crash never leaves a record half-written, and reads
/// return the most recent durable state. Values in the key/value shape are
/// JSON text; callers own the encoding.
pub trait RecordStore {
    /// Read a scalar value, or `None` if the key was never written.
    fn kv_get(&self, ns: KvNamespace, key: &str) -> Result<Option<String>>;

    /// Write a scalar value, replacing any previous one.
    fn kv_set(&self, ns: KvNamespace, key: &str, value: &str) -> Result<()>;

    /// Append one session record. Duplicate ids are rejected with a
    /// constraint error; records are never updated in place.
    fn insert_session(&self, session: &MeditationSession) -> Result<()>;

    /// Every stored session, in no guaranteed order.
    fn all_sessions(&self) -> Result<Vec<MeditationSession>>;

    /// Irreversibly delete all session records.
    fn clear_sessions(&self) -> Result<()>;
}

/// Returns `~/.config/serenity[-dev]/` based on SERENITY_ENV.
///
/// Set SERENITY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("SERENITY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("serenity-dev")
    } else {
        base_dir.join("serenity")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Pick the backing medium for this process.
///
/// Probes the embedded SQLite engine first; when it cannot be opened
/// (missing capability, permissions, quota) the JSON key/value file takes
/// over. Both mediums honor the same [`RecordStore`] contract, so nothing
/// above this call cares which one won.
///
/// # Errors
/// Returns an error only when neither medium is usable.
pub fn open_store() -> Result<Box<dyn RecordStore>> {
    let dir = data_dir()?;
    match SqliteStore::open_at(dir.join("serenity.db")) {
        Ok(db) => Ok(Box::new(db)),
        Err(e) => {
            log::warn!("sqlite backing unavailable ({e}), using key/value file store");
            Ok(Box::new(JsonFileStore::open_at(dir.join("serenity.json"))?))
        }
    }
}
