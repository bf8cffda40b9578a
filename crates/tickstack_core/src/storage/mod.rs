//! Durable slot storage.
//!
//! # Responsibility
//! - Define the key-value contract the persistence mirror writes through.
//! - Isolate SQLite details from store/mirror orchestration.

pub mod slot_store;
