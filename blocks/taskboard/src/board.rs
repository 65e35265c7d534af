use std::sync::Arc;

use dao_atoms::tasks::{CreateTaskPayload, Task, UpdateTaskPayload};
use dao_atoms::users::User;

use crate::error::BoardError;
use crate::seed::now_millis;
use crate::storage::{load_board, save_board, KeyValueStore};
use crate::types::{BoardFilter, BoardState, ColumnView};
use crate::view::board_view;

/// Owned task board container.
///
/// Every mutation is computed on a copy of the state, written through to
/// storage, and only then committed. A failed write leaves the board as it
/// was.
pub struct TaskBoard {
    state: BoardState,
    storage: Arc<dyn KeyValueStore>,
    session_user: User,
}

impl TaskBoard {
    /// Restore the board from storage, falling back to the default board.
    pub fn open(storage: Arc<dyn KeyValueStore>, session_user: User) -> Self {
        let state = load_board(storage.as_ref());
        Self::with_state(state, storage, session_user)
    }

    pub fn with_state(state: BoardState, storage: Arc<dyn KeyValueStore>, session_user: User) -> Self {
        Self {
            state,
            storage,
            session_user,
        }
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn session_user(&self) -> &User {
        &self.session_user
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.state.tasks.get(task_id)
    }

    /// Filtered and sorted read-side view. Stored order is untouched.
    pub fn view(&self, filter: &BoardFilter) -> Vec<ColumnView<'_>> {
        board_view(&self.state, filter)
    }

    pub(crate) fn commit(&mut self, next: BoardState) -> Result<(), BoardError> {
        save_board(self.storage.as_ref(), &next)?;
        self.state = next;
        Ok(())
    }

    /// Create a task in the requested column, or the first column when the
    /// request names none or a column that no longer exists.
    pub fn add_task(&mut self, payload: CreateTaskPayload) -> Result<Task, BoardError> {
        let title = payload.title.trim();
        if title.is_empty() {
            return Err(BoardError::MissingInput("task title"));
        }

        let requested = payload.column_id.as_deref().unwrap_or_default();
        let column_id = match self.state.columns.get(requested) {
            Some(column) => column.id.clone(),
            None => {
                let fallback = self
                    .state
                    .first_column_id()
                    .ok_or_else(|| BoardError::InvalidTarget(requested.to_string()))?;
                if !requested.is_empty() {
                    tracing::warn!("Column {} not found, adding task to {}", requested, fallback);
                }
                fallback.to_string()
            }
        };

        let task = Task {
            id: format!("task-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            description: payload.description,
            status: self.state.columns[&column_id].title.clone(),
            priority: payload.priority,
            due_date: payload.due_date,
            assignees: Vec::new(),
            tags: clean_tags(payload.tags),
            progress: Some(0),
            created_at: now_millis(),
            created_by: self.session_user.id.clone(),
            category: Some(payload.category.unwrap_or_default()),
            proposal_id: non_blank(payload.proposal_id),
            reward: non_blank(payload.reward),
        };

        let mut next = self.state.clone();
        next.tasks.insert(task.id.clone(), task.clone());
        next.append(&column_id, &task.id);
        self.commit(next)?;

        tracing::info!("Task {} created in column {}", task.id, column_id);
        Ok(task)
    }

    /// Replace a task's mutable fields. A status change moves the task to the
    /// column titled with the new status; when no column carries that title
    /// the task is dropped from its old column and left in no column.
    pub fn edit_task(&mut self, task_id: &str, edit: UpdateTaskPayload) -> Result<Task, BoardError> {
        let prior = self
            .state
            .tasks
            .get(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;

        let title = edit.title.trim();
        if title.is_empty() {
            return Err(BoardError::MissingInput("task title"));
        }

        let status_changed = prior.status != edit.status;
        let task = Task {
            title: title.to_string(),
            description: edit.description,
            status: edit.status,
            priority: edit.priority,
            due_date: edit.due_date,
            category: Some(edit.category.unwrap_or_default()),
            tags: clean_tags(edit.tags),
            proposal_id: non_blank(edit.proposal_id),
            reward: non_blank(edit.reward),
            progress: edit.progress.map(|p| p.min(100)),
            assignees: dedup_assignees(edit.assignees),
            ..prior.clone()
        };

        let mut next = self.state.clone();
        if status_changed {
            let current = next.column_containing(task_id).map(str::to_string);
            let target = next.column_titled(&task.status).map(str::to_string);

            match (current, target) {
                (Some(from), Some(to)) if from != to => {
                    next.detach(task_id);
                    next.append(&to, task_id);
                }
                (None, Some(to)) => next.append(&to, task_id),
                (Some(from), None) => {
                    tracing::warn!(
                        "No column titled \"{}\"; task {} removed from {}",
                        task.status,
                        task_id,
                        from
                    );
                    next.detach(task_id);
                }
                _ => {}
            }
        }
        next.tasks.insert(task_id.to_string(), task.clone());
        self.commit(next)?;

        tracing::info!("Task {} saved", task_id);
        Ok(task)
    }

    /// Delete a task once `confirm` agrees. Returns whether it was deleted.
    pub fn delete_task<F>(&mut self, task_id: &str, confirm: F) -> Result<bool, BoardError>
    where
        F: FnOnce(&Task) -> bool,
    {
        let task = self
            .state
            .tasks
            .get(task_id)
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;

        if !confirm(task) {
            return Ok(false);
        }

        let mut next = self.state.clone();
        next.tasks.remove(task_id);
        next.detach(task_id);
        self.commit(next)?;

        tracing::info!("Task {} deleted", task_id);
        Ok(true)
    }

    /// Drag a task onto another column. Returns false when nothing moved:
    /// the task already sits in that column, or sits in no column at all.
    pub fn move_task(&mut self, task_id: &str, destination: &str) -> Result<bool, BoardError> {
        if !self.state.tasks.contains_key(task_id) {
            return Err(BoardError::TaskNotFound(task_id.to_string()));
        }
        let dest_title = match self.state.columns.get(destination) {
            Some(column) => column.title.clone(),
            None => return Err(BoardError::InvalidTarget(destination.to_string())),
        };

        match self.state.column_containing(task_id) {
            Some(source) if source != destination => {}
            _ => return Ok(false),
        }

        let mut next = self.state.clone();
        next.detach(task_id);
        next.append(destination, task_id);
        if let Some(task) = next.tasks.get_mut(task_id) {
            task.status = dest_title.clone();
        }
        self.commit(next)?;

        tracing::info!("Task {} moved to \"{}\"", task_id, dest_title);
        Ok(true)
    }

    /// Add or remove the session user from a task's assignees.
    pub fn set_self_assignment(&mut self, task_id: &str, assign: bool) -> Result<Task, BoardError> {
        let mut task = self
            .state
            .tasks
            .get(task_id)
            .cloned()
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;

        let me = &self.session_user;
        if assign {
            if !task.is_assigned_to(&me.id) {
                task.assignees.push(me.clone());
            }
        } else {
            task.assignees.retain(|a| a.id != me.id);
        }

        let mut next = self.state.clone();
        next.tasks.insert(task_id.to_string(), task.clone());
        self.commit(next)?;
        Ok(task)
    }

    /// Flip the session user's assignment. Returns whether they are now assigned.
    pub fn toggle_self_assignment(&mut self, task_id: &str) -> Result<bool, BoardError> {
        let assigned = self
            .task(task_id)
            .map(|t| t.is_assigned_to(&self.session_user.id))
            .ok_or_else(|| BoardError::TaskNotFound(task_id.to_string()))?;
        self.set_self_assignment(task_id, !assigned)?;
        Ok(!assigned)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !cleaned.iter().any(|t| t == tag) {
            cleaned.push(tag.to_string());
        }
    }
    cleaned
}

fn dedup_assignees(assignees: Vec<User>) -> Vec<User> {
    let mut unique: Vec<User> = Vec::with_capacity(assignees.len());
    for user in assignees {
        if !unique.iter().any(|u| u.id == user.id) {
            unique.push(user);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_board;
    use crate::storage::{MemoryStorage, BOARD_STORAGE_KEY};
    use crate::StorageError;

    fn board() -> (TaskBoard, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let board = TaskBoard::with_state(default_board(), storage.clone(), User::mock_current());
        (board, storage)
    }

    fn column_of(board: &TaskBoard, task_id: &str) -> Option<String> {
        board.state().column_containing(task_id).map(str::to_string)
    }

    #[test]
    fn add_task_appends_to_requested_column() {
        let (mut board, storage) = board();
        let before = board.state().columns["column-1"].task_ids.len();

        let task = board
            .add_task(CreateTaskPayload {
                title: "Audit contract".into(),
                column_id: Some("column-1".into()),
                tags: vec![" security ".into(), "".into()],
                proposal_id: Some("  ".into()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(board.state().tasks.len(), 5);
        assert_eq!(board.state().columns["column-1"].task_ids.len(), before + 1);
        assert_eq!(board.state().columns["column-1"].task_ids.last(), Some(&task.id));
        assert_eq!(task.status, "To Do");
        assert_eq!(task.progress, Some(0));
        assert_eq!(task.created_by, "user-mock-current-001");
        assert_eq!(task.tags, vec!["security"]);
        assert_eq!(task.proposal_id, None);
        assert!(storage.get(BOARD_STORAGE_KEY).unwrap().unwrap().contains(&task.id));
    }

    #[test]
    fn add_task_requires_title() {
        let (mut board, _) = board();
        let err = board
            .add_task(CreateTaskPayload {
                title: "   ".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::MissingInput(_)));
        assert_eq!(board.state().tasks.len(), 4);
    }

    #[test]
    fn add_task_falls_back_to_first_column() {
        let (mut board, _) = board();
        let task = board
            .add_task(CreateTaskPayload {
                title: "Write docs".into(),
                column_id: Some("column-gone".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(column_of(&board, &task.id).as_deref(), Some("column-1"));
    }

    #[test]
    fn add_task_without_columns_is_invalid_target() {
        let storage = Arc::new(MemoryStorage::new());
        let empty = BoardState {
            tasks: Default::default(),
            columns: Default::default(),
            column_order: Vec::new(),
        };
        let mut board = TaskBoard::with_state(empty, storage, User::mock_current());

        let err = board
            .add_task(CreateTaskPayload {
                title: "Nowhere".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidTarget(_)));
        assert!(board.state().tasks.is_empty());
    }

    #[test]
    fn edit_status_moves_task_between_columns() {
        let (mut board, _) = board();
        let mut edit = UpdateTaskPayload::from(board.task("task-1").unwrap());
        edit.status = "Done".into();

        board.edit_task("task-1", edit).unwrap();

        assert_eq!(column_of(&board, "task-1").as_deref(), Some("column-3"));
        assert!(!board.state().columns["column-1"].contains("task-1"));
        assert!(board.state().check_invariants().is_empty());
    }

    #[test]
    fn edit_status_without_matching_column_orphans_task() {
        let (mut board, _) = board();
        let mut edit = UpdateTaskPayload::from(board.task("task-2").unwrap());
        edit.status = "Blocked".into();

        board.edit_task("task-2", edit).unwrap();

        assert_eq!(column_of(&board, "task-2"), None);
        assert_eq!(board.task("task-2").unwrap().status, "Blocked");
        assert_eq!(board.state().orphaned_tasks(), vec!["task-2"]);
        assert!(board.state().check_invariants().is_empty());

        // Editing back to a real column title re-homes the orphan.
        let mut edit = UpdateTaskPayload::from(board.task("task-2").unwrap());
        edit.status = "In Review".into();
        board.edit_task("task-2", edit).unwrap();
        assert_eq!(column_of(&board, "task-2").as_deref(), Some("column-4"));
    }

    #[test]
    fn edit_replaces_fields_but_keeps_identity() {
        let (mut board, _) = board();
        let original = board.task("task-3").unwrap().clone();
        let mut edit = UpdateTaskPayload::from(&original);
        edit.title = "Set up Discord + Telegram".into();
        edit.progress = Some(250);
        edit.reward = Some("".into());

        let saved = board.edit_task("task-3", edit).unwrap();

        assert_eq!(saved.title, "Set up Discord + Telegram");
        assert_eq!(saved.progress, Some(100));
        assert_eq!(saved.reward, None);
        assert_eq!(saved.created_at, original.created_at);
        assert_eq!(saved.created_by, original.created_by);
        assert_eq!(column_of(&board, "task-3").as_deref(), Some("column-2"));
    }

    #[test]
    fn edit_unknown_task_is_not_found() {
        let (mut board, _) = board();
        let edit = UpdateTaskPayload::from(board.task("task-1").unwrap());
        assert!(matches!(
            board.edit_task("task-404", edit),
            Err(BoardError::TaskNotFound(_))
        ));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut board, _) = board();

        assert!(!board.delete_task("task-3", |_| false).unwrap());
        assert!(board.task("task-3").is_some());

        assert!(board.delete_task("task-3", |t| t.id == "task-3").unwrap());
        assert!(board.task("task-3").is_none());
        assert!(!board.state().columns["column-2"].contains("task-3"));
        assert!(board.state().check_invariants().is_empty());
    }

    #[test]
    fn move_task_updates_status_and_lists() {
        let (mut board, _) = board();

        assert!(board.move_task("task-5", "column-4").unwrap());
        assert_eq!(board.task("task-5").unwrap().status, "In Review");
        assert_eq!(board.state().columns["column-4"].task_ids, vec!["task-5"]);
        assert_eq!(board.state().columns["column-2"].task_ids, vec!["task-3"]);

        // Same column is a no-op.
        assert!(!board.move_task("task-5", "column-4").unwrap());
        assert!(matches!(
            board.move_task("task-5", "column-9"),
            Err(BoardError::InvalidTarget(_))
        ));
    }

    #[test]
    fn move_of_orphaned_task_is_noop() {
        let (mut board, _) = board();
        let mut edit = UpdateTaskPayload::from(board.task("task-1").unwrap());
        edit.status = "Icebox".into();
        board.edit_task("task-1", edit).unwrap();

        assert!(!board.move_task("task-1", "column-3").unwrap());
        assert_eq!(board.task("task-1").unwrap().status, "Icebox");
    }

    #[test]
    fn self_assignment_is_deduplicated() {
        let (mut board, _) = board();

        // task-3 already lists the session user.
        let task = board.set_self_assignment("task-3", true).unwrap();
        assert_eq!(task.assignees.iter().filter(|a| a.id == "user-mock-current-001").count(), 1);

        assert!(!board.toggle_self_assignment("task-3").unwrap());
        assert!(!board.task("task-3").unwrap().is_assigned_to("user-mock-current-001"));
        assert!(board.toggle_self_assignment("task-3").unwrap());
        assert!(board.task("task-3").unwrap().is_assigned_to("user-mock-current-001"));
    }

    struct FailingStorage;

    impl KeyValueStore for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn failed_write_leaves_board_unchanged() {
        let mut board = TaskBoard::open(Arc::new(FailingStorage), User::mock_current());
        let before = board.state().clone();

        let err = board.move_task("task-1", "column-3").unwrap_err();

        assert!(matches!(err, BoardError::Storage(_)));
        assert_eq!(board.state(), &before);
    }
}
