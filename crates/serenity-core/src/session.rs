//! The meditation session record.
//!
//! One record per timed attempt, written when the countdown ends --
//! either naturally (`completed = true`) or because the user navigated
//! away early. Records are immutable once stored; the only delete
//! operation is the history-wide clear.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single meditation attempt, successful or abandoned.
///
/// `duration` is the *configured* session length in seconds, not the
/// elapsed time; an abandoned session keeps the length the user picked.
/// Field names in the serialized form match the app's stored JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationSession {
    /// Opaque unique token, generated when the countdown starts.
    pub id: String,
    /// Session end or abandonment time.
    pub date: DateTime<Utc>,
    /// Configured length in seconds.
    pub duration: u32,
    /// True only if the countdown reached zero naturally.
    pub completed: bool,
}

impl MeditationSession {
    /// Generate an opaque session token. Handed out when a countdown
    /// starts, so the eventual record keeps the same identity whether the
    /// session completes or is abandoned.
    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Record for a countdown that reached zero.
    pub fn completed(id: impl Into<String>, duration: u32, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date: at,
            duration,
            completed: true,
        }
    }

    /// Record for a session the user walked away from.
    pub fn abandoned(id: impl Into<String>, duration: u32, at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date: at,
            duration,
            completed: false,
        }
    }
}
