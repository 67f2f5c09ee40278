//! Ambient sound catalog and the last-used-sound preference.
//!
//! The catalog is fixed at build time; persistence only remembers which
//! entry the user picked last. Restoring the selection at startup does not
//! auto-resume playback -- playback is the host's concern.

use crate::error::{Result, StorageError};
use crate::storage::{KvNamespace, RecordStore};

const LAST_USED_KEY: &str = "last_used_sound";

/// One ambient sound the app can loop during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientSound {
    pub id: &'static str,
    pub name: &'static str,
    /// Icon hint for the host UI.
    pub icon: &'static str,
}

const CATALOG: [AmbientSound; 3] = [
    AmbientSound {
        id: "rain",
        name: "Rain",
        icon: "rainy-outline",
    },
    AmbientSound {
        id: "forest",
        name: "Forest",
        icon: "leaf-outline",
    },
    AmbientSound {
        id: "wave",
        name: "Ocean Waves",
        icon: "water-outline",
    },
];

/// The full ambient sound catalog, in display order.
pub fn catalog() -> &'static [AmbientSound] {
    &CATALOG
}

/// Look up a catalog entry by id.
pub fn by_id(id: &str) -> Option<&'static AmbientSound> {
    CATALOG.iter().find(|s| s.id == id)
}

/// Last-used-sound preference over the record store.
pub struct SoundPreference<'a> {
    store: &'a dyn RecordStore,
}

impl<'a> SoundPreference<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store }
    }

    /// The id of the sound the user picked last, if any.
    ///
    /// Storage failures are logged and answered with `None`.
    pub fn last_used(&self) -> Option<String> {
        match self.load() {
            Ok(id) => id,
            Err(e) => {
                log::warn!("failed to load sound preference ({e})");
                None
            }
        }
    }

    fn load(&self) -> Result<Option<String>> {
        match self.store.kv_get(KvNamespace::Preferences, LAST_USED_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::serialization(LAST_USED_KEY, e)),
            None => Ok(None),
        }
    }

    /// Remember the user's selection.
    ///
    /// # Errors
    /// `Constraint` if `id` does not name a catalog entry.
    pub fn set_last_used(&self, id: &str) -> Result<()> {
        if by_id(id).is_none() {
            return Err(StorageError::constraint(
                "lastUsedSoundId",
                format!("'{id}' is not in the sound catalog"),
            ));
        }
        let raw = serde_json::to_string(id)
            .map_err(|e| StorageError::serialization(LAST_USED_KEY, e))?;
        self.store
            .kv_set(KvNamespace::Preferences, LAST_USED_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    #[test]
    fn catalog_lookup() {
        assert_eq!(by_id("rain").unwrap().name, "Rain");
        assert_eq!(by_id("wave").unwrap().icon, "water-outline");
        assert!(by_id("whale-song").is_none());
    }

    #[test]
    fn preference_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let prefs = SoundPreference::new(&store);

        assert_eq!(prefs.last_used(), None);
        prefs.set_last_used("forest").unwrap();
        assert_eq!(prefs.last_used().as_deref(), Some("forest"));

        // Overwritten on each selection
        prefs.set_last_used("rain").unwrap();
        assert_eq!(prefs.last_used().as_deref(), Some("rain"));
    }

    #[test]
    fn unknown_sound_is_rejected() {
        let store = SqliteStore::open_in_memory().unwrap();
        let prefs = SoundPreference::new(&store);

        let err = prefs.set_last_used("whale-song").unwrap_err();
        assert!(err.is_constraint());
        assert_eq!(prefs.last_used(), None);
    }
}
