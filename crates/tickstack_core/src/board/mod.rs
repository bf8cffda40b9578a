//! Task Board: the owned state container UI handlers act on.

pub mod task_board;
