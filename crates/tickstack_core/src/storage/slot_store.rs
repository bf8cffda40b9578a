//! Durable key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Provide whole-value read/write access to named slots.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - `write_slot` overwrites the previous value in one statement.
//! - `SqliteSlotStore` only wraps connections with the latest schema applied.
//! - Writes refused for lack of space or permission surface as `Unavailable`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::rc::Rc;

const SLOT_TABLE: &str = "kv_slots";
const SLOT_COLUMNS: &[&str] = &["key", "value", "updated_at"];

pub type StorageResult<T> = Result<T, StorageError>;

/// Slot storage failure.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named-slot key-value storage.
pub trait SlotStore {
    /// Returns the slot value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>>;
    /// Replaces the slot value.
    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write_slot(key, value)
    }
}

/// SQLite-backed slot storage.
pub struct SqliteSlotStore {
    conn: Connection,
}

impl SqliteSlotStore {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is not latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the slot table
    ///   shape does not match.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(&conn)?;
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        ensure_slot_table(&conn)?;
        Ok(Self { conn })
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens (and migrates) a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotStore for SqliteSlotStore {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn
            .execute(
                "INSERT INTO kv_slots (key, value, updated_at)
                 VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at;",
                params![key, value],
            )
            .map_err(refused_write)?;
        Ok(())
    }
}

fn refused_write(err: rusqlite::Error) -> StorageError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DiskFull | ErrorCode::ReadOnly | ErrorCode::PermissionDenied) => {
            StorageError::Unavailable(err.to_string())
        }
        _ => err.into(),
    }
}

fn ensure_slot_table(conn: &Connection) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([SLOT_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(StorageError::MissingRequiredTable(SLOT_TABLE));
    }
    for &column in SLOT_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(StorageError::MissingRequiredColumn {
                table: SLOT_TABLE,
                column,
            });
        }
    }
    Ok(())
}

/// Process-local slot storage.
///
/// Clones share the same map, so a caller can keep a handle for inspection
/// while another clone is owned by the mirror.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one slot, e.g. with data written by an earlier session.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.slots.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
