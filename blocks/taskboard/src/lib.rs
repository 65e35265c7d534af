//! Kanban task board: an owned state container over tasks, columns and
//! column order, written through to a key/value store on every change.

pub mod board;
pub mod error;
pub mod seed;
pub mod storage;
pub mod sync;
pub mod types;
pub mod view;

pub use board::TaskBoard;
pub use error::{BoardError, StorageError};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, BOARD_STORAGE_KEY};
pub use types::{
    BoardFilter, BoardState, ColumnView, InvariantViolation, SortDirection, SortKey, SortSpec,
    UndatedPlacement,
};
