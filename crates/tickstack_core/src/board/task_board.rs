//! Interaction-surface facade over the task store.
//!
//! # Responsibility
//! - Wire storage, the persistence mirror and the store at startup.
//! - Expose the user actions a UI drives: submit, toggle, edit, delete.
//! - Hold per-task edit sessions (saved description + uncommitted draft).
//!
//! # Invariants
//! - The board is the single owner of its `TaskStore`; handlers borrow it.
//! - Edit drafts never reach the store until confirmed.
//! - Blank drafts are rejected on confirm, the same way blank submits are.
//! - Completed tasks cannot enter edit mode.

use crate::config::AppConfig;
use crate::mirror::persistence::{PersistenceMirror, RestoreOutcome};
use crate::model::task::{Task, TaskId, TaskPatch, TaskSummary};
use crate::storage::slot_store::{MemorySlotStore, SlotStore, SqliteSlotStore};
use crate::store::task_store::{SubscriptionId, TaskObserver, TaskStore};
use log::{debug, error, info};
use std::collections::BTreeMap;

/// Keys recognized while a task is in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    /// Enter: commit the draft.
    Confirm,
    /// Escape: drop the draft and revert.
    Escape,
}

/// Result of `TaskBoard::handle_key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Committed,
    /// Draft was blank; the session stays open.
    Rejected,
    Cancelled,
    NotEditing,
}

/// Where the board's slot lives for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Durable,
    /// Durable storage could not be opened; changes last for this process only.
    SessionOnly,
}

/// Transient edit state for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: TaskId,
    /// Description as last saved in the store.
    pub saved: String,
    pub draft: String,
}

/// Owned application state handed to UI handlers.
pub struct TaskBoard {
    store: TaskStore,
    edits: BTreeMap<TaskId, EditSession>,
    restore_outcome: RestoreOutcome,
    storage_mode: StorageMode,
}

impl TaskBoard {
    /// Opens durable storage under `config.data_dir`.
    ///
    /// Falls back to session-only storage when the database cannot be opened.
    pub fn open(config: &AppConfig) -> Self {
        let db_path = config.db_path();
        let (storage, mode): (Box<dyn SlotStore>, StorageMode) =
            match SqliteSlotStore::open(&db_path) {
                Ok(storage) => (Box::new(storage), StorageMode::Durable),
                Err(err) => {
                    error!(
                        "event=board_open module=board status=error error_code=storage_unavailable path={} error={}",
                        db_path.display(),
                        err
                    );
                    (Box::new(MemorySlotStore::new()), StorageMode::SessionOnly)
                }
            };

        let mut board = Self::with_store(TaskStore::new(), storage, &config.slot_key);
        board.storage_mode = mode;
        board
    }

    /// Builds a board over caller-provided storage.
    pub fn with_storage(storage: impl SlotStore + 'static, slot_key: &str) -> Self {
        Self::with_store(TaskStore::new(), storage, slot_key)
    }

    /// Builds a board over a caller-provided store and storage.
    ///
    /// Restores `store` from the slot, then subscribes the mirror so every
    /// later change is persisted.
    pub fn with_store(
        mut store: TaskStore,
        storage: impl SlotStore + 'static,
        slot_key: &str,
    ) -> Self {
        let mirror = PersistenceMirror::new(storage, slot_key);
        let restore_outcome = mirror.restore(&mut store);
        store.subscribe(mirror);
        info!(
            "event=board_open module=board status=ok slot={} tasks={}",
            slot_key,
            store.len()
        );

        Self {
            store,
            edits: BTreeMap::new(),
            restore_outcome,
            storage_mode: StorageMode::Durable,
        }
    }

    pub fn restore_outcome(&self) -> RestoreOutcome {
        self.restore_outcome
    }

    pub fn storage_mode(&self) -> StorageMode {
        self.storage_mode
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.list()
    }

    pub fn summary(&self) -> TaskSummary {
        self.store.summary()
    }

    /// Registers a UI-side observer next to the mirror.
    pub fn subscribe(&mut self, observer: impl TaskObserver + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    /// Submit action of the entry form.
    pub fn submit(&mut self, text: &str) -> Option<TaskId> {
        self.store.add(text)
    }

    pub fn toggle(&mut self, id: &TaskId) -> Option<bool> {
        self.store.toggle(id)
    }

    /// Deletes a task and discards any edit in progress for it.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        self.edits.remove(id);
        self.store.remove(id).is_some()
    }

    /// Enters edit mode for `id`.
    ///
    /// Refused for unknown or completed tasks. Re-entering keeps the draft.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        if self.edits.contains_key(id) {
            return true;
        }
        let Some(task) = self.store.get(id) else {
            return false;
        };
        if task.is_completed {
            debug!("event=edit_begin module=board status=skipped id={id} reason=completed");
            return false;
        }
        self.edits.insert(
            id.clone(),
            EditSession {
                task_id: id.clone(),
                saved: task.description.clone(),
                draft: task.description.clone(),
            },
        );
        true
    }

    pub fn is_editing(&self, id: &TaskId) -> bool {
        self.edits.contains_key(id)
    }

    pub fn edit_session(&self, id: &TaskId) -> Option<&EditSession> {
        self.edits.get(id)
    }

    /// Replaces the draft text. Returns `false` when `id` is not in edit mode.
    pub fn set_draft(&mut self, id: &TaskId, text: impl Into<String>) -> bool {
        match self.edits.get_mut(id) {
            Some(session) => {
                session.draft = text.into();
                true
            }
            None => false,
        }
    }

    /// Text a row should display: the draft while editing, else the saved text.
    pub fn display_text(&self, id: &TaskId) -> Option<&str> {
        if let Some(session) = self.edits.get(id) {
            return Some(session.draft.as_str());
        }
        self.store.get(id).map(|task| task.description.as_str())
    }

    /// Applies a confirm/escape key press to the edit session for `id`.
    pub fn handle_key(&mut self, id: &TaskId, key: EditKey) -> EditOutcome {
        let Some(session) = self.edits.get(id) else {
            return EditOutcome::NotEditing;
        };

        match key {
            EditKey::Escape => {
                self.edits.remove(id);
                EditOutcome::Cancelled
            }
            EditKey::Confirm => {
                let patch = TaskPatch::description(session.draft.clone());
                if self.store.update(id, &patch) {
                    self.edits.remove(id);
                    EditOutcome::Committed
                } else {
                    EditOutcome::Rejected
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EditKey, EditOutcome, TaskBoard};
    use crate::storage::slot_store::MemorySlotStore;

    #[test]
    fn display_text_follows_draft_until_escape() {
        let mut board = TaskBoard::with_storage(MemorySlotStore::new(), "todosList");
        let id = board.submit("Buy milk").unwrap();

        assert!(board.begin_edit(&id));
        board.set_draft(&id, "Buy bread");
        assert_eq!(board.display_text(&id), Some("Buy bread"));

        assert_eq!(board.handle_key(&id, EditKey::Escape), EditOutcome::Cancelled);
        assert_eq!(board.display_text(&id), Some("Buy milk"));
    }
}
