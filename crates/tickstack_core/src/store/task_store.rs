//! In-memory task collection and its change notifications.
//!
//! # Responsibility
//! - Own every task record, its identity and list position.
//! - Apply user-triggered mutations and notify subscribers afterwards.
//!
//! # Invariants
//! - Ids are unique within the collection at all times.
//! - Order is insertion order; update/toggle never move a task.
//! - Unknown ids and blank descriptions are no-ops, never errors.
//! - Observers run synchronously, after the mutation, in subscription order.

use crate::model::task::{is_blank, Task, TaskId, TaskPatch, TaskSummary};
use crate::store::ids::TaskIdGenerator;
use log::{debug, warn};
use std::collections::HashSet;

/// Mutation applied to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskChange {
    Added(TaskId),
    Updated(TaskId),
    Toggled(TaskId),
    Removed(TaskId),
    /// Whole collection swapped, e.g. by a restore.
    Replaced { count: usize },
}

impl TaskChange {
    /// Short label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Updated(_) => "updated",
            Self::Toggled(_) => "toggled",
            Self::Removed(_) => "removed",
            Self::Replaced { .. } => "replaced",
        }
    }
}

/// Subscriber to "collection changed" events.
pub trait TaskObserver {
    /// Called after every applied mutation with the resulting collection.
    fn on_change(&mut self, change: &TaskChange, tasks: &[Task]);
}

impl<F> TaskObserver for F
where
    F: FnMut(&TaskChange, &[Task]),
{
    fn on_change(&mut self, change: &TaskChange, tasks: &[Task]) {
        self(change, tasks)
    }
}

/// Handle returned by `TaskStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Authoritative ordered task collection.
pub struct TaskStore {
    tasks: Vec<Task>,
    ids: TaskIdGenerator,
    observers: Vec<(SubscriptionId, Box<dyn TaskObserver>)>,
    next_subscription: u64,
}

impl TaskStore {
    /// Empty store with wall-clock-seeded ids.
    pub fn new() -> Self {
        Self::with_id_generator(TaskIdGenerator::new())
    }

    pub fn with_id_generator(ids: TaskIdGenerator) -> Self {
        Self {
            tasks: Vec::new(),
            ids,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Appends a new open task.
    ///
    /// Returns `None` without touching the collection when `description`
    /// is blank.
    pub fn add(&mut self, description: impl Into<String>) -> Option<TaskId> {
        let description = description.into();
        if is_blank(&description) {
            debug!("event=task_add module=store status=skipped reason=blank_description");
            return None;
        }

        let id = self.ids.next_id();
        self.tasks.push(Task {
            id: id.clone(),
            description,
            is_completed: false,
        });
        debug!("event=task_add module=store status=ok id={id}");
        self.emit(TaskChange::Added(id.clone()));
        Some(id)
    }

    /// Merges `patch` into the task with `id`.
    ///
    /// Returns whether anything was applied. Unknown ids, empty patches and
    /// patches carrying a blank description are ignored.
    pub fn update(&mut self, id: &TaskId, patch: &TaskPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Err(err) = patch.validate() {
            debug!("event=task_update module=store status=skipped id={id} reason={err}");
            return false;
        }
        let Some(slot) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_update module=store status=skipped id={id} reason=not_found");
            return false;
        };
        *slot = slot.merged(patch);
        self.emit(TaskChange::Updated(id.clone()));
        true
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| &task.id == id)?;
        task.is_completed = !task.is_completed;
        let is_completed = task.is_completed;
        self.emit(TaskChange::Toggled(id.clone()));
        Some(is_completed)
    }

    /// Removes the task with `id` and returns it.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|task| &task.id == id)?;
        let removed = self.tasks.remove(index);
        self.emit(TaskChange::Removed(removed.id.clone()));
        Some(removed)
    }

    /// Current tasks in display order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.tasks)
    }

    /// Replaces the whole collection, keeping input order.
    ///
    /// Later records reusing an already-seen id are dropped so uniqueness
    /// holds. Restored ids are fed to the id generator. Returns the number of
    /// tasks kept.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> usize {
        let mut seen = HashSet::with_capacity(tasks.len());
        let mut kept = Vec::with_capacity(tasks.len());
        for task in tasks {
            if !seen.insert(task.id.clone()) {
                warn!(
                    "event=task_replace module=store status=warn reason=duplicate_id id={}",
                    task.id
                );
                continue;
            }
            self.ids.observe(&task.id);
            kept.push(task);
        }

        self.tasks = kept;
        let count = self.tasks.len();
        self.emit(TaskChange::Replaced { count });
        count
    }

    /// Registers an observer; it sees every later change.
    pub fn subscribe(&mut self, observer: impl TaskObserver + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drops an observer. Returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn emit(&mut self, change: TaskChange) {
        let tasks = &self.tasks;
        for (_, observer) in &mut self.observers {
            observer.on_change(&change, tasks);
        }
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}
