//! Ordered result log.

use derive_getters::Getters;
use mosaic_core::{GenerationResult, Modality, ResultId, Sequence, SlotId, Thumbnail};
use mosaic_error::{FailureClass, MosaicError};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// State of one logged attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    /// Request in flight
    Pending,
    /// Result delivered
    Complete(GenerationResult),
    /// Failure delivered
    Failed {
        /// Failure class shown to the user
        class: FailureClass,
        /// Error text
        message: String,
    },
    /// Discarded because a newer request took the slot
    Superseded,
}

impl EntryStatus {
    /// Failure entry for `error`.
    pub fn failed(error: &MosaicError) -> Self {
        EntryStatus::Failed {
            class: error.class(),
            message: error.to_string(),
        }
    }
}

/// One attempt in the log.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct LogEntry {
    /// Stable id; updates replace the entry with this id in place
    id: ResultId,
    /// Slot the attempt targeted
    slot: SlotId,
    /// Sequence within the slot
    sequence: Sequence,
    /// Requested modality
    modality: Modality,
    /// Current status
    status: EntryStatus,
}

/// Append-only list of attempts in initiation order.
///
/// Entries are never removed; a pending entry is replaced by id when its
/// attempt completes, fails, is superseded, or gains a thumbnail. Clones share
/// the same log.
#[derive(Debug, Clone, Default)]
pub struct ResultLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl ResultLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_pending(
        &self,
        id: ResultId,
        slot: SlotId,
        sequence: Sequence,
        modality: Modality,
    ) {
        self.lock().push(LogEntry {
            id,
            slot,
            sequence,
            modality,
            status: EntryStatus::Pending,
        });
    }

    /// Replace the status of entry `id`. Returns false if there is no such entry.
    pub fn update(&self, id: ResultId, status: EntryStatus) -> bool {
        let mut entries = self.lock();
        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                debug!(result_id = %id, ?status, "Updated log entry");
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Swap the thumbnail of a completed video entry.
    pub fn update_thumbnail(&self, id: ResultId, thumbnail: Thumbnail) -> bool {
        let mut entries = self.lock();
        match entries.iter_mut().find(|entry| entry.id == id) {
            Some(LogEntry {
                status: EntryStatus::Complete(result),
                ..
            }) => {
                *result = result.with_thumbnail(thumbnail);
                true
            }
            _ => false,
        }
    }

    /// Entry `id`, if logged.
    pub fn get(&self, id: ResultId) -> Option<LogEntry> {
        self.lock().iter().find(|entry| entry.id == id).cloned()
    }

    /// Copy of every entry in initiation order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing was ever logged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
