use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tickstack_core::{Task, TaskChange, TaskId, TaskIdGenerator, TaskPatch, TaskStore};

fn sequential_store() -> TaskStore {
    TaskStore::with_id_generator(TaskIdGenerator::sequential())
}

fn descriptions(store: &TaskStore) -> Vec<&str> {
    store
        .list()
        .iter()
        .map(|task| task.description.as_str())
        .collect()
}

#[test]
fn adds_grow_collection_with_unique_ids() {
    let mut store = TaskStore::new();

    let ids: Vec<TaskId> = (0..50)
        .map(|n| store.add(format!("task {n}")).unwrap())
        .collect();

    assert_eq!(store.len(), 50);
    let unique: HashSet<_> = ids.iter().cloned().collect();
    assert_eq!(unique.len(), 50);
}

#[test]
fn blank_add_leaves_collection_unchanged() {
    let mut store = sequential_store();
    store.add("keep");

    assert_eq!(store.add(""), None);
    assert_eq!(store.add("   \n"), None);
    assert_eq!(descriptions(&store), ["keep"]);
}

#[test]
fn toggle_twice_restores_original_flag() {
    let mut store = sequential_store();
    let id = store.add("flip").unwrap();

    assert_eq!(store.toggle(&id), Some(true));
    assert_eq!(store.toggle(&id), Some(false));
    assert!(!store.get(&id).unwrap().is_completed);
}

#[test]
fn operations_after_remove_are_noops() {
    let mut store = sequential_store();
    let id = store.add("gone").unwrap();
    let other = store.add("stays").unwrap();

    let removed = store.remove(&id).unwrap();
    assert_eq!(removed.description, "gone");

    assert!(store.remove(&id).is_none());
    assert_eq!(store.toggle(&id), None);
    assert!(!store.update(&id, &TaskPatch::description("back")));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].id, other);
}

#[test]
fn buy_milk_scenario() {
    let mut store = sequential_store();

    let id = store.add("Buy milk").unwrap();
    assert_eq!(store.list(), [Task::new(id.clone(), "Buy milk").unwrap()]);

    store.toggle(&id);
    assert!(store.get(&id).unwrap().is_completed);

    assert!(store.update(&id, &TaskPatch::description("Buy oat milk")));
    let task = store.get(&id).unwrap();
    assert_eq!(task.description, "Buy oat milk");
    assert!(task.is_completed);

    store.remove(&id);
    assert!(store.is_empty());
}

#[test]
fn toggle_does_not_reorder() {
    let mut store = sequential_store();
    let a = store.add("A").unwrap();
    store.add("B").unwrap();

    store.toggle(&a);
    assert_eq!(descriptions(&store), ["A", "B"]);

    store.update(&a, &TaskPatch::description("A2"));
    assert_eq!(descriptions(&store), ["A2", "B"]);
}

#[test]
fn blank_update_is_rejected() {
    let mut store = sequential_store();
    let id = store.add("original").unwrap();

    assert!(!store.update(&id, &TaskPatch::description("   ")));
    assert_eq!(store.get(&id).unwrap().description, "original");
}

#[test]
fn observers_see_each_change_after_it_is_applied() {
    let mut store = sequential_store();
    let log: Rc<RefCell<Vec<(TaskChange, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    store.subscribe(move |change: &TaskChange, tasks: &[Task]| {
        sink.borrow_mut().push((change.clone(), tasks.len()));
    });

    let a = store.add("A").unwrap();
    let b = store.add("B").unwrap();
    store.toggle(&a);
    store.update(&b, &TaskPatch::completion(true));
    store.remove(&a);

    assert_eq!(
        *log.borrow(),
        vec![
            (TaskChange::Added(a.clone()), 1),
            (TaskChange::Added(b.clone()), 2),
            (TaskChange::Toggled(a.clone()), 2),
            (TaskChange::Updated(b), 2),
            (TaskChange::Removed(a), 1),
        ]
    );
}

#[test]
fn summary_counts_completed_tasks() {
    let mut store = sequential_store();
    let a = store.add("A").unwrap();
    store.add("B").unwrap();
    store.add("C").unwrap();
    store.toggle(&a);

    let summary = store.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.to_string(), "1 of 3 tasks completed");
}

#[test]
fn frozen_clock_ids_stay_unique() {
    let mut store = TaskStore::with_id_generator(TaskIdGenerator::with_clock(|| 1_000));
    let first = store.add("one").unwrap();
    let second = store.add("two").unwrap();

    assert_eq!(first, TaskId::new(1_000));
    assert_eq!(second, TaskId::new(1_001));
}
