use std::sync::Arc;

use dao_atoms::proposals::{InMemoryProposalStore, ProposalRepository, ProposalStatus};
use dao_atoms::tasks::{CreateTaskPayload, TaskCategory, UpdateTaskPayload};
use dao_atoms::users::{User, SYSTEM_GENERATED_USER_ID};
use taskboard_block::{FileStorage, KeyValueStore, MemoryStorage, TaskBoard, BOARD_STORAGE_KEY};

fn generated_for<'a>(board: &'a TaskBoard, proposal_id: &str) -> Vec<&'a str> {
    board
        .state()
        .tasks
        .values()
        .filter(|t| t.proposal_id.as_deref() == Some(proposal_id))
        .map(|t| t.id.as_str())
        .collect()
}

#[test]
fn sync_is_idempotent_across_runs() {
    let store = InMemoryProposalStore::seeded();
    let mut board = TaskBoard::open(Arc::new(MemoryStorage::new()), User::mock_current());

    // PROP-004 and PROP-009 are executed in the seed data.
    assert_eq!(board.sync_executed_proposals(&store.list()).unwrap(), 2);
    assert_eq!(board.sync_executed_proposals(&store.list()).unwrap(), 0);

    for id in ["PROP-004", "PROP-009"] {
        let generated = generated_for(&board, id);
        assert_eq!(generated.len(), 1, "{id} should have exactly one task");

        let task = board.task(generated[0]).unwrap();
        assert_eq!(task.category, Some(TaskCategory::GovernanceAction));
        assert_eq!(task.created_by, SYSTEM_GENERATED_USER_ID);
        assert!(task.assignees.is_empty());
        assert_eq!(task.status, "To Do");
        assert!(board.state().columns["column-1"].contains(&task.id));
    }

    let audit = board.task(generated_for(&board, "PROP-009")[0]).unwrap();
    assert_eq!(audit.title, "Action Items: Security Audit for New Lending Module");
    assert_eq!(audit.tags, vec!["proposal-action", "security-team"]);
    assert!(board.state().check_invariants().is_empty());
}

#[test]
fn sync_skips_proposals_already_linked_by_a_task() {
    let store = InMemoryProposalStore::seeded();
    let mut board = TaskBoard::open(Arc::new(MemoryStorage::new()), User::mock_current());

    board
        .add_task(CreateTaskPayload {
            title: "Follow up on module X".into(),
            proposal_id: Some("PROP-004".into()),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(board.sync_executed_proposals(&store.list()).unwrap(), 1);
    assert_eq!(generated_for(&board, "PROP-004").len(), 1);
}

#[test]
fn newly_executed_proposal_is_picked_up_by_next_sync() {
    let store = InMemoryProposalStore::seeded();
    let mut board = TaskBoard::open(Arc::new(MemoryStorage::new()), User::mock_current());
    board.sync_executed_proposals(&store.list()).unwrap();

    store.set_status("PROP-002", ProposalStatus::Executed).unwrap();

    assert_eq!(board.sync_executed_proposals(&store.list()).unwrap(), 1);
    assert_eq!(generated_for(&board, "PROP-002").len(), 1);
    assert_eq!(board.sync_executed_proposals(&store.list()).unwrap(), 0);
}

#[test]
fn sync_survives_reload_without_duplicating() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
    let store = InMemoryProposalStore::seeded();

    let mut board = TaskBoard::open(storage.clone(), User::mock_current());
    board.sync_executed_proposals(&store.list()).unwrap();
    let task_count = board.state().tasks.len();
    drop(board);

    let mut reopened = TaskBoard::open(storage, User::mock_current());
    assert_eq!(reopened.state().tasks.len(), task_count);
    assert_eq!(reopened.sync_executed_proposals(&store.list()).unwrap(), 0);
}

#[test]
fn board_changes_persist_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));

    let mut board = TaskBoard::open(storage.clone(), User::mock_current());
    let task = board
        .add_task(CreateTaskPayload {
            title: "Audit contract".into(),
            column_id: Some("column-1".into()),
            ..Default::default()
        })
        .unwrap();
    board.move_task(&task.id, "column-2").unwrap();

    let mut edit = UpdateTaskPayload::from(board.task("task-1").unwrap());
    edit.description = "Updated".into();
    board.edit_task("task-1", edit).unwrap();

    let reopened = TaskBoard::open(storage.clone(), User::mock_current());
    assert_eq!(reopened.state(), board.state());
    assert_eq!(reopened.task(&task.id).unwrap().status, "In Progress");
    assert_eq!(reopened.task("task-1").unwrap().description, "Updated");

    let blob = storage.get(BOARD_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert!(value.get("columnOrder").is_some());
    assert!(value["columns"]["column-2"]["taskIds"].is_array());
}

#[test]
fn malformed_blob_falls_back_to_seed_board() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .set(BOARD_STORAGE_KEY, r#"{"tasks": {}, "columns": {}}"#)
        .unwrap();

    let board = TaskBoard::open(storage, User::mock_current());

    assert_eq!(board.state().column_order, vec!["column-1", "column-2", "column-4", "column-3"]);
    assert_eq!(board.state().tasks.len(), 4);
}
