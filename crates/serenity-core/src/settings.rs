//! Application settings: theme and reminder preferences.
//!
//! Exactly one settings record exists per installation. It is created with
//! defaults the first time anything reads it and updated only via partial
//! merge -- fields a patch doesn't mention are left untouched.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::storage::{KvNamespace, RecordStore};

const SETTINGS_KEY: &str = "app";

/// User-facing application settings.
///
/// Serialized with the app's stored JSON field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
    /// Daily reminder as "HH:MM", or none.
    #[serde(default)]
    pub reminder_time: Option<String>,
}

fn default_dark_mode() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications_enabled: false,
            reminder_time: None,
        }
    }
}

/// Partial update for [`AppSettings`]: only present fields are applied.
///
/// `reminder_time` is doubly optional so a patch can distinguish "leave
/// untouched" (`None`) from "clear the reminder" (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub dark_mode: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub reminder_time: Option<Option<String>>,
}

impl AppSettings {
    /// Merge a patch into this value, field by field.
    fn merge(&mut self, patch: &SettingsPatch) {
        if let Some(dark_mode) = patch.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(notifications_enabled) = patch.notifications_enabled {
            self.notifications_enabled = notifications_enabled;
        }
        if let Some(reminder_time) = &patch.reminder_time {
            self.reminder_time = reminder_time.clone();
        }
    }
}

/// Settings service over the record store.
pub struct Settings<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> Settings<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// Current settings, default-initializing the record on first access.
    ///
    /// Storage failures are logged and answered with the defaults; reading
    /// settings never fails the caller.
    pub fn get(&self) -> AppSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("failed to load settings ({e}), using defaults");
                AppSettings::default()
            }
        }
    }

    fn load(&self) -> Result<AppSettings> {
        match self.store.kv_get(KvNamespace::Settings, SETTINGS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::serialization(SETTINGS_KEY, e)),
            None => {
                let defaults = AppSettings::default();
                self.save(&defaults)?;
                Ok(defaults)
            }
        }
    }

    fn save(&self, settings: &AppSettings) -> Result<()> {
        let raw = serde_json::to_string(settings)
            .map_err(|e| StorageError::serialization(SETTINGS_KEY, e))?;
        self.store.kv_set(KvNamespace::Settings, SETTINGS_KEY, &raw)
    }

    /// Merge the supplied fields into the stored settings and persist.
    ///
    /// Read-modify-write; the single foreground writer makes this safe
    /// without a transaction around the get-then-set.
    ///
    /// # Errors
    /// `Constraint` if a supplied reminder time is not "HH:MM";
    /// `Unavailable` if the store cannot persist the result.
    pub fn update(&self, patch: &SettingsPatch) -> Result<()> {
        if let Some(Some(reminder)) = &patch.reminder_time {
            validate_reminder_time(reminder)?;
        }
        let mut settings = self.load()?;
        settings.merge(patch);
        self.save(&settings)
    }
}

fn validate_reminder_time(value: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        StorageError::constraint(
            "reminderTime",
            format!("'{value}' is not a valid HH:MM time of day"),
        )
    })?;
    Ok(())
}
