use tickstack_core::{
    MemorySlotStore, MirrorError, PersistenceMirror, RestoreOutcome, SlotStore, SqliteSlotStore,
    StorageError, StorageResult, TaskId, TaskIdGenerator, TaskPatch, TaskStore, DEFAULT_SLOT_KEY,
};

/// Storage whose every call fails, standing in for a full or read-only disk.
struct UnavailableSlotStore;

impl SlotStore for UnavailableSlotStore {
    fn read_slot(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable("read refused".to_string()))
    }

    fn write_slot(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("quota exceeded".to_string()))
    }
}

fn sequential_store() -> TaskStore {
    TaskStore::with_id_generator(TaskIdGenerator::sequential())
}

#[test]
fn persist_then_restore_roundtrips_collection() {
    let storage = MemorySlotStore::new();
    let mirror = PersistenceMirror::new(storage.clone(), DEFAULT_SLOT_KEY);

    let mut original = sequential_store();
    let a = original.add("A").unwrap();
    original.add("B").unwrap();
    original.add("C").unwrap();
    original.toggle(&a);
    mirror.persist(original.list()).unwrap();

    let mut restored = TaskStore::new();
    let outcome = PersistenceMirror::new(storage, DEFAULT_SLOT_KEY).restore(&mut restored);

    assert_eq!(outcome, RestoreOutcome::Restored { count: 3 });
    assert_eq!(restored.list(), original.list());
}

#[test]
fn restore_with_missing_slot_keeps_store_empty() {
    let mirror = PersistenceMirror::new(MemorySlotStore::new(), DEFAULT_SLOT_KEY);
    let mut store = TaskStore::new();

    assert_eq!(mirror.restore(&mut store), RestoreOutcome::Missing);
    assert!(store.is_empty());
}

#[test]
fn restore_with_empty_sequence_keeps_store_unchanged() {
    let mirror = PersistenceMirror::new(
        MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, "[]"),
        DEFAULT_SLOT_KEY,
    );
    let mut store = sequential_store();
    store.add("already here");

    assert_eq!(mirror.restore(&mut store), RestoreOutcome::Empty);
    assert_eq!(store.len(), 1);
}

#[test]
fn restore_with_malformed_slot_does_not_panic() {
    for raw in [
        "not json",
        "{\"id\":1}",
        "[{\"id\":1,\"description\":\"no flag\"}]",
        "null",
    ] {
        let mirror = PersistenceMirror::new(
            MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw),
            DEFAULT_SLOT_KEY,
        );
        let mut store = TaskStore::new();

        assert_eq!(mirror.restore(&mut store), RestoreOutcome::Malformed, "input: {raw}");
        assert!(store.is_empty());
    }
}

#[test]
fn restore_accepts_legacy_timestamp_and_string_ids() {
    let raw = r#"[
        {"id": 1718000000000, "description": "numeric", "isCompleted": true},
        {"id": "1718000000001", "description": "string", "isCompleted": false}
    ]"#;
    let mirror = PersistenceMirror::new(
        MemorySlotStore::with_slot(DEFAULT_SLOT_KEY, raw),
        DEFAULT_SLOT_KEY,
    );
    let mut store = TaskStore::with_id_generator(TaskIdGenerator::with_clock(|| 1));

    assert_eq!(mirror.restore(&mut store), RestoreOutcome::Restored { count: 2 });
    assert!(store.get(&TaskId::new(1_718_000_000_000)).unwrap().is_completed);

    let fresh = store.add("new").unwrap();
    assert_eq!(fresh, TaskId::new(1_718_000_000_002));
}

#[test]
fn restore_from_unavailable_storage_is_not_fatal() {
    let mirror = PersistenceMirror::new(UnavailableSlotStore, DEFAULT_SLOT_KEY);
    let mut store = TaskStore::new();

    assert_eq!(mirror.restore(&mut store), RestoreOutcome::Unavailable);
    assert!(store.is_empty());
}

#[test]
fn subscribed_mirror_writes_latest_state_after_every_change() {
    let storage = MemorySlotStore::new();
    let mut store = sequential_store();
    store.subscribe(PersistenceMirror::new(storage.clone(), DEFAULT_SLOT_KEY));

    let id = store.add("Buy milk").unwrap();
    let after_add: serde_json::Value =
        serde_json::from_str(&storage.get(DEFAULT_SLOT_KEY).unwrap()).unwrap();
    assert_eq!(
        after_add,
        serde_json::json!([{ "id": 1, "description": "Buy milk", "isCompleted": false }])
    );

    store.toggle(&id);
    store.update(&id, &TaskPatch::description("Buy oat milk"));
    let after_edit: serde_json::Value =
        serde_json::from_str(&storage.get(DEFAULT_SLOT_KEY).unwrap()).unwrap();
    assert_eq!(
        after_edit,
        serde_json::json!([{ "id": 1, "description": "Buy oat milk", "isCompleted": true }])
    );

    store.remove(&id);
    assert_eq!(storage.get(DEFAULT_SLOT_KEY).as_deref(), Some("[]"));
}

#[test]
fn write_failures_leave_in_memory_state_authoritative() {
    let mut store = sequential_store();
    store.subscribe(PersistenceMirror::new(UnavailableSlotStore, DEFAULT_SLOT_KEY));

    let id = store.add("still here").unwrap();
    store.toggle(&id);

    assert_eq!(store.len(), 1);
    assert!(store.get(&id).unwrap().is_completed);
}

#[test]
fn persist_error_is_reported_to_direct_callers() {
    let mirror = PersistenceMirror::new(UnavailableSlotStore, DEFAULT_SLOT_KEY);
    let err = mirror.persist(&[]).unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn read_only_database_is_reported_as_unavailable() {
    let storage = SqliteSlotStore::open_in_memory().unwrap();
    storage
        .connection()
        .execute_batch("PRAGMA query_only = ON;")
        .unwrap();
    let mirror = PersistenceMirror::new(storage, DEFAULT_SLOT_KEY);

    let err = mirror.persist(&[]).unwrap_err();
    assert!(
        matches!(err, MirrorError::Storage(StorageError::Unavailable(_))),
        "unexpected error: {err}"
    );
}

#[test]
fn sqlite_backed_mirror_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickstack.sqlite3");

    {
        let mut store = sequential_store();
        store.subscribe(PersistenceMirror::new(
            SqliteSlotStore::open(&path).unwrap(),
            DEFAULT_SLOT_KEY,
        ));
        let a = store.add("A").unwrap();
        store.add("B").unwrap();
        store.toggle(&a);
    }

    let mirror = PersistenceMirror::new(SqliteSlotStore::open(&path).unwrap(), DEFAULT_SLOT_KEY);
    let mut store = TaskStore::new();
    assert_eq!(mirror.restore(&mut store), RestoreOutcome::Restored { count: 2 });
    let list = store.list();
    assert_eq!(list[0].description, "A");
    assert!(list[0].is_completed);
    assert_eq!(list[1].description, "B");
    assert!(!list[1].is_completed);
}

#[test]
fn slots_are_isolated_by_key() {
    let storage = MemorySlotStore::new();
    let work = PersistenceMirror::new(storage.clone(), "work");
    let mut store = sequential_store();
    store.add("report");
    work.persist(store.list()).unwrap();

    let home = PersistenceMirror::new(storage, "home");
    let mut other = TaskStore::new();
    assert_eq!(home.restore(&mut other), RestoreOutcome::Missing);
}
