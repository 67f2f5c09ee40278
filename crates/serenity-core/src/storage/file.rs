//! JSON-file-backed record store.
//!
//! The key/value medium: one JSON document holding the session log and a
//! string-to-string map of namespaced scalar values. The document is read
//! once when the store opens and rewritten in full on every mutation, via
//! a temp file renamed over the original so a crash mid-write leaves the
//! previous document intact.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::session::MeditationSession;

use super::{KvNamespace, RecordStore};

/// Prefix for every scalar key, so the document's kv entries can't collide
/// with unrelated data if the file is ever merged into a shared medium.
const KEY_PREFIX: &str = "serenity";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDoc {
    #[serde(default)]
    sessions: Vec<MeditationSession>,
    #[serde(default)]
    kv: BTreeMap<String, String>,
}

/// Record store persisted as a single JSON document.
pub struct JsonFileStore {
    path: PathBuf,
    doc: RefCell<StoreDoc>,
}

impl JsonFileStore {
    /// Open the store backed by the given file.
    ///
    /// A missing file starts an empty store; an unreadable or corrupt
    /// document is logged and treated as empty rather than failing open.
    ///
    /// # Errors
    /// Returns `Unavailable` if the parent directory cannot be created.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let doc = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(doc) => doc,
                Err(e) => {
                    log::warn!(
                        "store document {} is corrupt ({e}), starting empty",
                        path.display()
                    );
                    StoreDoc::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreDoc::default(),
            Err(e) => {
                log::warn!(
                    "store document {} is unreadable ({e}), starting empty",
                    path.display()
                );
                StoreDoc::default()
            }
        };
        Ok(Self {
            path,
            doc: RefCell::new(doc),
        })
    }

    fn full_key(ns: KvNamespace, key: &str) -> String {
        format!("{KEY_PREFIX}.{}.{key}", ns.as_str())
    }

    /// Write a document to disk. Write-then-rename keeps the replacement
    /// atomic at the filesystem level.
    fn write_doc(path: &Path, doc: &StoreDoc) -> Result<()> {
        let content = serde_json::to_string_pretty(doc)
            .map_err(|e| StorageError::serialization(KEY_PREFIX, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Apply a mutation and persist it. The in-memory document is only
    /// replaced once the write lands, so after a failed write reads keep
    /// returning the last durable state.
    fn mutate<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut StoreDoc) -> Result<()>,
    {
        let mut next = {
            let doc = self.doc.borrow();
            StoreDoc {
                sessions: doc.sessions.clone(),
                kv: doc.kv.clone(),
            }
        };
        apply(&mut next)?;
        Self::write_doc(&self.path, &next)?;
        *self.doc.borrow_mut() = next;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn kv_get(&self, ns: KvNamespace, key: &str) -> Result<Option<String>> {
        Ok(self.doc.borrow().kv.get(&Self::full_key(ns, key)).cloned())
    }

    fn kv_set(&self, ns: KvNamespace, key: &str, value: &str) -> Result<()> {
        self.mutate(|doc| {
            doc.kv.insert(Self::full_key(ns, key), value.to_string());
            Ok(())
        })
    }

    fn insert_session(&self, session: &MeditationSession) -> Result<()> {
        self.mutate(|doc| {
            if doc.sessions.iter().any(|s| s.id == session.id) {
                return Err(StorageError::constraint("id", "record already exists"));
            }
            doc.sessions.push(session.clone());
            Ok(())
        })
    }

    fn all_sessions(&self) -> Result<Vec<MeditationSession>> {
        Ok(self.doc.borrow().sessions.clone())
    }

    fn clear_sessions(&self) -> Result<()> {
        self.mutate(|doc| {
            doc.sessions.clear();
            Ok(())
        })
    }
}
