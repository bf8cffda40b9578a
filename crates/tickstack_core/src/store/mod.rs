//! Task Store: the single owner of the in-memory task collection.

pub mod ids;
pub mod task_store;
