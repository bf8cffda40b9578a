//! Task domain model.
//!
//! # Responsibility
//! - Define the record shape shared by the store, the mirror and the board.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard remove; there are no tombstones.

pub mod task;
