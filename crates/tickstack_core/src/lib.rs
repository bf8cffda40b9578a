//! Core domain logic for TickStack.
//! This crate owns the task list, its persistence mirror and the board UIs drive.

pub mod board;
pub mod config;
pub mod db;
pub mod logging;
pub mod mirror;
pub mod model;
pub mod storage;
pub mod store;

pub use board::task_board::{EditKey, EditOutcome, EditSession, StorageMode, TaskBoard};
pub use config::AppConfig;
pub use logging::{
    default_log_level, init_logging, init_logging_for, logging_status, LoggingError,
};
pub use mirror::persistence::{
    MirrorError, MirrorResult, PersistenceMirror, RestoreOutcome, DEFAULT_SLOT_KEY,
};
pub use model::task::{Task, TaskId, TaskPatch, TaskSummary, TaskValidationError};
pub use storage::slot_store::{
    MemorySlotStore, SlotStore, SqliteSlotStore, StorageError, StorageResult,
};
pub use store::ids::TaskIdGenerator;
pub use store::task_store::{SubscriptionId, TaskChange, TaskObserver, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
