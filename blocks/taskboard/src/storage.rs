use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use dao_atoms::tasks::{Column, Task};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::StorageError;
use crate::seed::default_board;
use crate::types::BoardState;

/// Key the board blob is stored under.
pub const BOARD_STORAGE_KEY: &str = "taskBoardData_v1";

/// Browser-style local storage: string values under string keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Top-level shape of the stored blob. All three fields must be present;
/// entries are decoded one by one so a single bad task or column does not
/// cost the rest of the board.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBoard {
    tasks: HashMap<String, Value>,
    columns: HashMap<String, Value>,
    column_order: Vec<String>,
}

/// Restore the board from storage. Anything short of a blob carrying all of
/// `tasks`, `columns` and `columnOrder` yields the default board.
pub fn load_board(store: &dyn KeyValueStore) -> BoardState {
    let raw = match store.get(BOARD_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No stored board under {}, using default", BOARD_STORAGE_KEY);
            return default_board();
        }
        Err(e) => {
            tracing::error!("Failed to read stored board: {}", e);
            return default_board();
        }
    };

    match serde_json::from_str::<StoredBoard>(&raw) {
        Ok(stored) => restore(stored),
        Err(e) => {
            tracing::warn!("Error parsing stored board data, using default: {}", e);
            default_board()
        }
    }
}

fn restore(stored: StoredBoard) -> BoardState {
    let tasks = decode_entries::<Task>("task", stored.tasks);
    let mut columns = decode_entries::<Column>("column", stored.columns);

    for column in columns.values_mut() {
        column.task_ids.retain(|id| {
            let known = tasks.contains_key(id);
            if !known {
                tracing::warn!("Dropping unknown task {} from column {}", id, column.id);
            }
            known
        });
    }

    BoardState {
        tasks,
        columns,
        column_order: stored.column_order,
    }
}

fn decode_entries<T: DeserializeOwned>(kind: &str, raw: HashMap<String, Value>) -> HashMap<String, T> {
    raw.into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<T>(value) {
            Ok(entry) => Some((id, entry)),
            Err(e) => {
                tracing::warn!("Skipping unreadable stored {} {}: {}", kind, id, e);
                None
            }
        })
        .collect()
}

pub fn save_board(store: &dyn KeyValueStore, state: &BoardState) -> Result<(), StorageError> {
    let blob = serde_json::to_string(state)?;
    store.set(BOARD_STORAGE_KEY, &blob)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blob_falls_back_to_default() {
        let store = MemoryStorage::new();
        assert_eq!(load_board(&store).column_order, default_board().column_order);
    }

    #[test]
    fn blob_without_column_order_falls_back_to_default() {
        let store = MemoryStorage::new();
        store
            .set(BOARD_STORAGE_KEY, r#"{"tasks": {}, "columns": {}}"#)
            .unwrap();

        let board = load_board(&store);
        assert_eq!(board.column_order.len(), 4);
        assert!(board.tasks.contains_key("task-1"));
    }

    #[test]
    fn garbage_blob_falls_back_to_default() {
        let store = MemoryStorage::new();
        store.set(BOARD_STORAGE_KEY, "not json").unwrap();
        assert!(!load_board(&store).tasks.is_empty());
    }

    #[test]
    fn complete_blob_is_used_verbatim() {
        let store = MemoryStorage::new();
        store
            .set(
                BOARD_STORAGE_KEY,
                r#"{"tasks": {}, "columns": {"c": {"id": "c", "title": "Backlog", "taskIds": []}}, "columnOrder": ["c"]}"#,
            )
            .unwrap();

        let board = load_board(&store);
        assert!(board.tasks.is_empty());
        assert_eq!(board.column_order, vec!["c".to_string()]);
        assert_eq!(board.columns["c"].title, "Backlog");
    }

    #[test]
    fn one_bad_task_keeps_the_rest_of_the_board() {
        let store = MemoryStorage::new();
        store
            .set(
                BOARD_STORAGE_KEY,
                r#"{
                    "tasks": {
                        "t1": {"id": "t1", "title": "Cleared date", "status": "Backlog", "priority": "High",
                               "dueDate": "", "createdAt": 1720000000000, "createdBy": "user-alice-002"},
                        "t2": {"id": "t2", "title": "Broken", "status": "Backlog", "priority": "Urgent",
                               "createdAt": 1720000000000, "createdBy": "user-alice-002"}
                    },
                    "columns": {"c1": {"id": "c1", "title": "Backlog", "taskIds": ["t1", "t2"]}},
                    "columnOrder": ["c1"]
                }"#,
            )
            .unwrap();

        let board = load_board(&store);

        assert_eq!(board.column_order, vec!["c1".to_string()]);
        assert_eq!(board.columns["c1"].title, "Backlog");
        assert_eq!(board.columns["c1"].task_ids, vec!["t1"]);
        assert_eq!(board.tasks["t1"].due_date, None);
        assert!(!board.tasks.contains_key("t2"));
        assert!(board.check_invariants().is_empty());
    }

    #[test]
    fn wrong_top_level_shape_falls_back_to_default() {
        let store = MemoryStorage::new();
        store
            .set(BOARD_STORAGE_KEY, r#"{"tasks": [], "columns": {}, "columnOrder": []}"#)
            .unwrap();
        assert_eq!(load_board(&store).column_order, default_board().column_order);
    }

    #[test]
    fn file_storage_round_trips_board() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStorage::new(dir.path().join("nested"));

        assert_eq!(store.get(BOARD_STORAGE_KEY).unwrap(), None);

        let board = default_board();
        save_board(&store, &board).unwrap();

        assert!(dir.path().join("nested").join("taskBoardData_v1.json").exists());
        assert_eq!(load_board(&store), board);
    }
}
