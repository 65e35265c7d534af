// Re-export model types
pub mod model;

pub use model::{Column, CreateTaskPayload, Priority, Task, TaskCategory, UpdateTaskPayload};
