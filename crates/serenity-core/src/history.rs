//! Append-only log of meditation sessions.

use crate::error::{Result, StorageError};
use crate::session::MeditationSession;
use crate::storage::RecordStore;

/// Session history service over the record store.
///
/// The log is append-only: records are never updated, and the only delete
/// is the history-wide [`clear`](SessionHistory::clear).
pub struct SessionHistory<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> SessionHistory<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Append one session record.
    ///
    /// # Errors
    /// `Constraint` if `duration` is zero, `id` is empty, or a record with
    /// the same id already exists; `Unavailable` if the medium fails. A
    /// failed append is surfaced once and not retried.
    pub fn append(&self, session: &MeditationSession) -> Result<()> {
        if session.id.is_empty() {
            return Err(StorageError::constraint("id", "must not be empty"));
        }
        if session.duration == 0 {
            return Err(StorageError::constraint(
                "duration",
                "must be greater than zero",
            ));
        }
        self.store.insert_session(session)
    }

    /// Every stored session, in no guaranteed order; sort by `date`
    /// descending for recency.
    ///
    /// Storage failures are logged and answered with the empty list, so
    /// stats render as zeroes instead of crashing the caller.
    pub fn all(&self) -> Vec<MeditationSession> {
        match self.store.all_sessions() {
            Ok(sessions) => sessions,
            Err(e) => {
                log::warn!("failed to read session history ({e})");
                Vec::new()
            }
        }
    }

    /// Irreversibly delete the whole history.
    pub fn clear(&self) -> Result<()> {
        self.store.clear_sessions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use chrono::Utc;

    #[test]
    fn append_rejects_zero_duration() {
        let store = SqliteStore::open_in_memory().unwrap();
        let history = SessionHistory::new(&store);

        let err = history
            .append(&MeditationSession::completed("s1", 0, Utc::now()))
            .unwrap_err();
        assert!(err.is_constraint());
        assert!(history.all().is_empty());
    }

    #[test]
    fn append_rejects_empty_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let history = SessionHistory::new(&store);

        let err = history
            .append(&MeditationSession::completed("", 300, Utc::now()))
            .unwrap_err();
        assert!(err.is_constraint());
    }

    #[test]
    fn append_then_all_returns_the_record() {
        let store = SqliteStore::open_in_memory().unwrap();
        let history = SessionHistory::new(&store);
        let session = MeditationSession::abandoned(MeditationSession::new_id(), 600, Utc::now());

        history.append(&session).unwrap();
        assert_eq!(history.all(), vec![session]);
    }

    #[test]
    fn clear_then_all_is_empty() {
        let store = SqliteStore::open_in_memory().unwrap();
        let history = SessionHistory::new(&store);

        history
            .append(&MeditationSession::completed("s1", 300, Utc::now()))
            .unwrap();
        history.clear().unwrap();
        assert!(history.all().is_empty());
    }
}
