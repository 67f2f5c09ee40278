//! # Serenity Core Library
//!
//! This library provides the persistence and statistics layer for the
//! Serenity meditation app. The host UI layers (screens, navigation,
//! animation, audio playback) sit on top of it; nothing in here renders
//! or plays anything.
//!
//! ## Architecture
//!
//! - **Record Store**: durable key-addressed storage behind one trait,
//!   with two backing mediums -- the embedded SQLite engine and a JSON
//!   key/value file -- selected once at process start by a capability
//!   probe
//! - **Services**: session history, settings, and sound preference, each
//!   constructed explicitly over a store reference
//! - **Statistics**: pure functions deriving weekly minute buckets, totals,
//!   and the day streak from the session log
//!
//! ## Key Components
//!
//! - [`MeditationSession`]: the immutable session record
//! - [`SessionHistory`]: append-only session log
//! - [`Settings`] / [`AppSettings`]: partial-merge configuration
//! - [`open_store`]: backing-medium probe
//! - [`stats`]: statistics derivation

pub mod analytics;
pub mod error;
pub mod history;
pub mod session;
pub mod settings;
pub mod sounds;
pub mod stats;
pub mod storage;

pub use analytics::{Analytics, EventName};
pub use error::{Result, StorageError};
pub use history::SessionHistory;
pub use session::MeditationSession;
pub use settings::{AppSettings, Settings, SettingsPatch};
pub use sounds::{AmbientSound, SoundPreference};
pub use stats::{completed_count, streak, total_minutes, weekly_buckets, DayBucket};
pub use storage::{open_store, JsonFileStore, KvNamespace, RecordStore, SqliteStore};
