//! Gallery Store: the ordered list of saved worksheet renders.
//!
//! The in-memory list is the source of truth; storage is a best-effort
//! mirror. Persistence failures are logged and surfaced as a degraded
//! status, never as a user-facing error, and never roll back memory.

use serde::{Deserialize, Serialize};

use crate::storage::Storage;
use crate::Clock;

/// One saved worksheet render. Immutable once created, except deletion.
/// Field names are a compatibility contract with the original persisted
/// data (`catWorksheetGallery`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: u64,
    pub name: String,
    /// PNG data URI, also used directly as the gallery thumbnail
    pub image: String,
    pub date: String,
}

/// Result of a best-effort persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    /// The write failed; in-memory state and storage may now diverge.
    Degraded,
}

/// Append-ordered gallery with best-effort persistence.
#[derive(Debug)]
pub struct GalleryStore {
    storage_key: String,
    items: Vec<Artwork>,
    degraded: bool,
}

impl GalleryStore {
    pub fn new(storage_key: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
            items: Vec::new(),
            degraded: false,
        }
    }

    /// Artworks in append order (oldest first).
    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the last persist failed and storage may be stale.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Append a new artwork and return its id.
    ///
    /// Ids are timestamp-derived but forced strictly monotonic, so two
    /// saves within the same millisecond still get distinct ids. The name
    /// falls back to an auto-numbered label when the worksheet name is
    /// empty.
    pub fn append(&mut self, worksheet_name: &str, image: String, clock: &dyn Clock) -> u64 {
        let last_id = self.items.iter().map(|a| a.id).max().unwrap_or(0);
        let id = clock.now_ms().max(last_id + 1);
        let name = if worksheet_name.is_empty() {
            format!("さくひん {}", self.items.len() + 1)
        } else {
            worksheet_name.to_string()
        };
        self.items.push(Artwork {
            id,
            name,
            image,
            date: clock.stamp(),
        });
        id
    }

    /// Remove the artwork with the matching id; all others keep their
    /// relative order. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        self.items.len() != before
    }

    /// Replace the in-memory list from storage. Empty or unreadable
    /// storage leaves the list empty; failures are logged and never
    /// propagated to the caller.
    pub fn load(&mut self, storage: &dyn Storage) {
        let raw = match storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                log::error!("gallery load failed: {}", e);
                return;
            }
        };
        match serde_json::from_str::<Vec<Artwork>>(&raw) {
            Ok(items) => self.items = items,
            Err(e) => log::error!("gallery decode failed: {}", e),
        }
    }

    /// Serialize the full list into storage. Failures are logged and
    /// reported as a degraded outcome; the in-memory list is untouched
    /// either way.
    pub fn persist(&mut self, storage: &mut dyn Storage) -> PersistOutcome {
        let raw = match serde_json::to_string(&self.items) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("gallery serialize failed: {}", e);
                self.degraded = true;
                return PersistOutcome::Degraded;
            }
        };
        match storage.set(&self.storage_key, &raw) {
            Ok(()) => {
                self.degraded = false;
                PersistOutcome::Saved
            }
            Err(e) => {
                log::error!("gallery persist failed: {}", e);
                self.degraded = true;
                PersistOutcome::Degraded
            }
        }
    }
}
