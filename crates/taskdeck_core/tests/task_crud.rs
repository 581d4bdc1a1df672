use std::collections::HashSet;
use taskdeck_core::{
    MemoryKvStore, Priority, TaskError, TaskRepository, TaskSnapshotStore, TaskValidationError,
};

fn memory_repo() -> TaskRepository<MemoryKvStore> {
    TaskRepository::open(TaskSnapshotStore::with_default_key(MemoryKvStore::new()))
}

#[test]
fn create_assigns_pairwise_distinct_ids() {
    let mut repo = memory_repo();
    let mut ids = HashSet::new();
    for index in 0..200 {
        let task = repo
            .create(format!("task {index}"), "body", Priority::Low)
            .unwrap();
        assert!(ids.insert(task.id), "duplicate id {}", task.id);
    }
    assert_eq!(repo.len(), 200);
}

#[test]
fn ids_increase_with_insertion_order() {
    let mut repo = memory_repo();
    let first = repo.create("a", "a", Priority::Low).unwrap();
    let second = repo.create("b", "b", Priority::High).unwrap();
    let third = repo.create("c", "c", Priority::Medium).unwrap();
    assert!(first.id < second.id && second.id < third.id);
}

#[test]
fn create_sets_defaults_and_appends() {
    let mut repo = memory_repo();
    let task = repo.create("Buy milk", "2%", Priority::Medium).unwrap();

    assert!(!task.completed);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(repo.list(), std::slice::from_ref(&task));
}

#[test]
fn update_preserves_id_and_completed() {
    let mut repo = memory_repo();
    let task = repo.create("Buy milk", "2%", Priority::Medium).unwrap();
    repo.toggle_complete(task.id).unwrap();

    let updated = repo
        .update(task.id, "Buy oat milk", "barista", Priority::High)
        .unwrap();
    assert_eq!(updated.id, task.id);
    assert!(updated.completed);
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, "barista");
    assert_eq!(updated.priority, Priority::High);
}

#[test]
fn toggle_preserves_editable_fields() {
    let mut repo = memory_repo();
    let task = repo.create("Pay rent", "rent", Priority::High).unwrap();

    let toggled = repo.toggle_complete(task.id).unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.title, task.title);
    assert_eq!(toggled.description, task.description);
    assert_eq!(toggled.priority, task.priority);
}

#[test]
fn toggling_twice_restores_completion() {
    let mut repo = memory_repo();
    repo.create("Buy milk", "2%", Priority::Medium).unwrap();
    let rent = repo.create("Pay rent", "rent", Priority::High).unwrap();

    repo.toggle_complete(rent.id).unwrap();
    let restored = repo.toggle_complete(rent.id).unwrap();
    assert!(!restored.completed);
    assert!(!repo.get(rent.id).unwrap().completed);
}

#[test]
fn update_and_toggle_unknown_id_fail_not_found() {
    let mut repo = memory_repo();
    assert_eq!(
        repo.update(12, "t", "d", Priority::Low).unwrap_err(),
        TaskError::NotFound(12)
    );
    assert_eq!(repo.toggle_complete(12).unwrap_err(), TaskError::NotFound(12));
}

#[test]
fn blank_title_blocks_create_without_changes() {
    let mut repo = memory_repo();
    repo.create("keep", "me", Priority::Low).unwrap();
    let before = repo.list().to_vec();

    let err = repo.create("", "x", Priority::Low).unwrap_err();
    assert_eq!(err, TaskError::Validation(TaskValidationError::EmptyTitle));
    assert_eq!(repo.list(), before.as_slice());
}

#[test]
fn blank_fields_block_update_without_changes() {
    let mut repo = memory_repo();
    let task = repo.create("keep", "me", Priority::Low).unwrap();

    let err = repo.update(task.id, "  ", "x", Priority::High).unwrap_err();
    assert_eq!(err, TaskError::Validation(TaskValidationError::EmptyTitle));
    let err = repo.update(task.id, "x", "\t", Priority::High).unwrap_err();
    assert_eq!(
        err,
        TaskError::Validation(TaskValidationError::EmptyDescription)
    );
    assert_eq!(repo.get(task.id), Some(&task));
}

#[test]
fn delete_twice_matches_delete_once() {
    let mut repo = memory_repo();
    let first = repo.create("a", "a", Priority::Low).unwrap();
    let second = repo.create("b", "b", Priority::Low).unwrap();

    let removed = repo.delete(first.id);
    assert_eq!(removed.as_ref(), Some(&first));
    let after_once = repo.list().to_vec();

    assert!(repo.delete(first.id).is_none());
    assert_eq!(repo.list(), after_once.as_slice());
    assert_eq!(repo.list(), std::slice::from_ref(&second));
}

#[test]
fn delete_keeps_canonical_order_of_remaining_tasks() {
    let mut repo = memory_repo();
    let a = repo.create("a", "a", Priority::High).unwrap();
    let b = repo.create("b", "b", Priority::Low).unwrap();
    let c = repo.create("c", "c", Priority::Medium).unwrap();

    repo.delete(b.id);
    let ids: Vec<i64> = repo.list().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
}
