//! Current-session snapshot storage.
//!
//! A single `{nome, email, profile_image?}` record, written after login and
//! after profile updates, cleared on logout. It is a display cache, never a
//! source of truth: flows that need fresh data re-fetch the user row by the
//! snapshot's email and write back. Backed by a small JSON file under the
//! data directory so the session survives process restarts, mirroring the
//! device key-value slot it replaces.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::Error;

const SESSION_FILE: &str = "current_user.json";

/// Denormalized copy of the identity fields screens render between
/// authoritative fetches. May drift from the user row until the next
/// write-back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Holds at most one snapshot. Constructed per process (or per test) and
/// passed explicitly; there is no ambient global session.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<SessionSnapshot>>,
}

impl SessionStore {
    /// Open the session slot under `data_dir`, loading any snapshot left by
    /// a previous run. An unreadable file is discarded with a warning: the
    /// snapshot is a cache, so losing it only costs a re-login.
    pub fn open(data_dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(SESSION_FILE);

        let current = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Discarding unreadable session snapshot: {}", e);
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            current: RwLock::new(current),
        })
    }

    /// Overwrite the stored snapshot. Called after login and after a
    /// profile update.
    pub fn set(&self, snapshot: SessionSnapshot) -> Result<(), Error> {
        let raw = serde_json::to_string(&snapshot)?;
        fs::write(&self.path, raw)?;
        *self.current.write() = Some(snapshot);
        Ok(())
    }

    /// The snapshot, or `None` if never set or cleared.
    pub fn get(&self) -> Option<SessionSnapshot> {
        self.current.read().clone()
    }

    /// Drop the snapshot. Called on logout.
    pub fn clear(&self) -> Result<(), Error> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self.current.write() = None;
        Ok(())
    }
}
