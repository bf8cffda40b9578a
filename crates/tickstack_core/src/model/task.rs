//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record mirrored to the durable slot.
//! - Define the partial-update shape used by edit paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `description` is non-blank for tasks created through `Task::new`.
//! - Wire field names are `id`, `description`, `isCompleted`.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable, opaque identifier for one task.
///
/// Ids keep the JSON shape they were stored with: new ids are numbers, and
/// string ids written by other clients (e.g. UUIDs) round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(u64),
    Text(String),
}

impl TaskId {
    pub const fn new(value: u64) -> Self {
        Self::Number(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Numeric value of the id, including text ids that spell an integer.
    pub fn numeric_value(&self) -> Option<u64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(value) => value.trim().parse().ok(),
        }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for TaskId {
    type Err = Infallible;

    /// Integers become `Number`, anything else is kept as `Text`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<u64>() {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Text(trimmed.to_string()),
        })
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Description is empty after trimming.
    BlankDescription,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankDescription => write!(f, "task description must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// User-supplied text, stored as typed.
    pub description: String,
    pub is_completed: bool,
}

impl Task {
    /// Creates an open task with the provided id.
    ///
    /// # Errors
    /// - Returns `BlankDescription` when `description` trims to empty.
    pub fn new(id: TaskId, description: impl Into<String>) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            description: description.into(),
            is_completed: false,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if is_blank(&self.description) {
            return Err(TaskValidationError::BlankDescription);
        }
        Ok(())
    }

    /// Returns a new record with `patch` merged over this one.
    ///
    /// `id` is never touched by a patch.
    pub fn merged(&self, patch: &TaskPatch) -> Self {
        Self {
            id: self.id.clone(),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            is_completed: patch.is_completed.unwrap_or(self.is_completed),
        }
    }
}

/// Partial update for `TaskStore::update`.
///
/// `None` fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    /// Patch replacing only the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            is_completed: None,
        }
    }

    /// Patch setting only the completion flag.
    pub fn completion(is_completed: bool) -> Self {
        Self {
            description: None,
            is_completed: Some(is_completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.is_completed.is_none()
    }

    /// Rejects patches that would leave a blank description.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        match self.description.as_deref() {
            Some(text) if is_blank(text) => Err(TaskValidationError::BlankDescription),
            _ => Ok(()),
        }
    }
}

/// Completion counters over a task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.is_completed).count(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }

    /// Completed share in whole percent, `0` for an empty list.
    pub fn progress_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let completed = self.completed.min(self.total);
        ((completed * 100) / self.total) as u8
    }
}

impl Display for TaskSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} tasks completed", self.completed, self.total)
    }
}

/// Whether `text` carries no visible characters.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
