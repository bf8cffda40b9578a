//! Application configuration.
//!
//! # Responsibility
//! - Describe where the slot database and logs live.
//! - Carry the slot key and log level chosen by the host.

use crate::logging::default_log_level;
use crate::mirror::persistence::DEFAULT_SLOT_KEY;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "tickstack.sqlite3";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_DATA_DIR_NAME: &str = "tickstack";

/// Host-supplied settings for one `TaskBoard`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory for the database and logs.
    pub data_dir: PathBuf,
    /// Durable slot holding the task list.
    pub slot_key: String,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
}

impl AppConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            log_level: default_log_level().to_string(),
        }
    }

    pub fn with_slot_key(mut self, slot_key: impl Into<String>) -> Self {
        self.slot_key = slot_key.into();
        self
    }

    pub fn with_log_level(mut self, log_level: impl Into<String>) -> Self {
        self.log_level = log_level.into();
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl Default for AppConfig {
    /// Data under the OS temp directory.
    fn default() -> Self {
        Self::new(std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME))
    }
}
