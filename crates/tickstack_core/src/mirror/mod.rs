//! Persistence Mirror.
//!
//! # Responsibility
//! - Bridge the in-memory store and durable slot storage.
//! - Keep storage failures local to the session (log and continue).

pub mod persistence;
