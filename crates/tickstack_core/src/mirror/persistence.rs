//! Persistence mirror between the task store and one durable slot.
//!
//! # Responsibility
//! - Restore the store from the slot once at startup.
//! - Overwrite the slot with the full collection after every change.
//!
//! # Invariants
//! - Restore never fails the caller; bad or missing data leaves the store as is.
//! - Every write is a whole-collection overwrite of a single slot.
//! - Write failures on the observer path are logged, never propagated.

use crate::model::task::Task;
use crate::storage::slot_store::{SlotStore, StorageError};
use crate::store::task_store::{TaskChange, TaskObserver, TaskStore};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Slot name used when the caller does not configure one.
pub const DEFAULT_SLOT_KEY: &str = "todosList";

pub type MirrorResult<T> = Result<T, MirrorError>;

/// Failure while reading or writing the mirrored slot.
#[derive(Debug)]
pub enum MirrorError {
    Storage(StorageError),
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for MirrorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
            Self::Decode(err) => write!(f, "failed to decode persisted tasks: {err}"),
        }
    }
}

impl Error for MirrorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

impl From<StorageError> for MirrorError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Result of `PersistenceMirror::restore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Store contents replaced with `count` tasks.
    Restored { count: usize },
    /// Slot was never written.
    Missing,
    /// Slot held an empty sequence.
    Empty,
    /// Slot content was not a sequence of task records.
    Malformed,
    /// Backend read failed.
    Unavailable,
}

impl RestoreOutcome {
    fn label(self) -> &'static str {
        match self {
            Self::Restored { .. } => "restored",
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::Malformed => "malformed",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Keeps one durable slot in sync with a `TaskStore`.
pub struct PersistenceMirror<S: SlotStore> {
    storage: S,
    slot_key: String,
}

impl<S: SlotStore> PersistenceMirror<S> {
    pub fn new(storage: S, slot_key: impl Into<String>) -> Self {
        Self {
            storage,
            slot_key: slot_key.into(),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads and decodes the slot without touching any store.
    ///
    /// Returns `Ok(None)` when the slot was never written.
    pub fn load(&self) -> MirrorResult<Option<Vec<Task>>> {
        let Some(raw) = self.storage.read_slot(&self.slot_key)? else {
            return Ok(None);
        };
        let tasks = serde_json::from_str::<Vec<Task>>(&raw).map_err(MirrorError::Decode)?;
        Ok(Some(tasks))
    }

    /// Restores `store` from the slot when it holds at least one task.
    pub fn restore(&self, store: &mut TaskStore) -> RestoreOutcome {
        let outcome = match self.load() {
            Ok(None) => RestoreOutcome::Missing,
            Ok(Some(tasks)) if tasks.is_empty() => RestoreOutcome::Empty,
            Ok(Some(tasks)) => RestoreOutcome::Restored {
                count: store.replace_all(tasks),
            },
            Err(err) => {
                warn!(
                    "event=mirror_restore module=mirror status=error slot={} error={}",
                    self.slot_key, err
                );
                match err {
                    MirrorError::Storage(_) => RestoreOutcome::Unavailable,
                    MirrorError::Encode(_) | MirrorError::Decode(_) => RestoreOutcome::Malformed,
                }
            }
        };

        info!(
            "event=mirror_restore module=mirror status={} slot={} tasks={}",
            outcome.label(),
            self.slot_key,
            store.len()
        );
        outcome
    }

    /// Writes the full task sequence, replacing the previous slot value.
    pub fn persist(&self, tasks: &[Task]) -> MirrorResult<()> {
        let started_at = Instant::now();
        let payload = serde_json::to_string(tasks).map_err(MirrorError::Encode)?;
        self.storage.write_slot(&self.slot_key, &payload)?;
        debug!(
            "event=mirror_persist module=mirror status=ok slot={} tasks={} bytes={} duration_ms={}",
            self.slot_key,
            tasks.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

impl<S: SlotStore> TaskObserver for PersistenceMirror<S> {
    fn on_change(&mut self, change: &TaskChange, tasks: &[Task]) {
        if let Err(err) = self.persist(tasks) {
            warn!(
                "event=mirror_persist module=mirror status=error change={} slot={} error={}",
                change.label(),
                self.slot_key,
                err
            );
        }
    }
}
