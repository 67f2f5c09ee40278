//! SQLite-backed record store.
//!
//! The tabular medium: one table for session records, one for settings,
//! one for miscellaneous preferences. Schema creation is idempotent and
//! runs once when the store opens.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Result, StorageError};
use crate::session::MeditationSession;

use super::{KvNamespace, RecordStore};

/// SQLite database for session records and key/value state.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns `Unavailable` if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database. Used by tests and as an ephemeral
    /// scratch store; contents vanish when the value drops.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS meditation_sessions (
                id        TEXT PRIMARY KEY,
                date      TEXT NOT NULL,
                duration  INTEGER NOT NULL,
                completed INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS app_settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_preferences (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_meditation_sessions_date
                ON meditation_sessions(date);",
        )?;
        Ok(())
    }

    fn kv_table(ns: KvNamespace) -> &'static str {
        match ns {
            KvNamespace::Settings => "app_settings",
            KvNamespace::Preferences => "user_preferences",
        }
    }
}

impl RecordStore for SqliteStore {
    fn kv_get(&self, ns: KvNamespace, key: &str) -> Result<Option<String>> {
        let sql = format!("SELECT value FROM {} WHERE key = ?1", Self::kv_table(ns));
        let mut stmt = self.conn.prepare(&sql)?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, ns: KvNamespace, key: &str, value: &str) -> Result<()> {
        let sql = format!(
            "INSERT OR REPLACE INTO {} (key, value) VALUES (?1, ?2)",
            Self::kv_table(ns)
        );
        self.conn.execute(&sql, params![key, value])?;
        Ok(())
    }

    fn insert_session(&self, session: &MeditationSession) -> Result<()> {
        self.conn.execute(
            "INSERT INTO meditation_sessions (id, date, duration, completed)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.id,
                session.date.to_rfc3339(),
                session.duration,
                session.completed as i64,
            ],
        )?;
        Ok(())
    }

    fn all_sessions(&self) -> Result<Vec<MeditationSession>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, duration, completed FROM meditation_sessions")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            let (id, date, duration, completed) = row?;
            let date = DateTime::parse_from_rfc3339(&date)
                .map_err(|e| StorageError::serialization(&id, e))?
                .with_timezone(&Utc);
            sessions.push(MeditationSession {
                id,
                date,
                duration,
                completed: completed != 0,
            });
        }
        Ok(sessions)
    }

    fn clear_sessions(&self) -> Result<()> {
        self.conn.execute("DELETE FROM meditation_sessions", [])?;
        Ok(())
    }
}
