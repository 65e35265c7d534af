use std::cmp::Ordering;
use std::collections::HashMap;

use dao_atoms::tasks::{Column, Priority, Task, TaskCategory};
use serde::{Deserialize, Serialize};

// ========== BOARD STATE ==========

/// The three maps that together make up one board. Persisted verbatim as
/// `{"tasks": .., "columns": .., "columnOrder": [..]}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    pub tasks: HashMap<String, Task>,
    pub columns: HashMap<String, Column>,
    pub column_order: Vec<String>,
}

impl BoardState {
    /// `columnOrder[0]`, provided that column exists. A stale first entry
    /// is not skipped over.
    pub fn first_column_id(&self) -> Option<&str> {
        self.column_order
            .first()
            .filter(|id| self.columns.contains_key(*id))
            .map(String::as_str)
    }

    /// Column currently holding `task_id`, if any.
    pub fn column_containing(&self, task_id: &str) -> Option<&str> {
        self.ordered_column_ids()
            .find(|id| self.columns[*id].contains(task_id))
    }

    /// First column (in board order) whose title equals `title`.
    pub fn column_titled(&self, title: &str) -> Option<&str> {
        self.ordered_column_ids()
            .find(|id| self.columns[*id].title == title)
    }

    /// Columns in `column_order` first, then any the order does not mention.
    fn ordered_column_ids(&self) -> impl Iterator<Item = &str> {
        let ordered = self
            .column_order
            .iter()
            .filter(move |id| self.columns.contains_key(*id))
            .map(String::as_str);
        let mut rest = self
            .columns
            .keys()
            .filter(|id| !self.column_order.contains(*id))
            .map(String::as_str)
            .collect::<Vec<_>>();
        rest.sort_unstable();
        ordered.chain(rest)
    }

    pub(crate) fn detach(&mut self, task_id: &str) {
        for column in self.columns.values_mut() {
            column.task_ids.retain(|id| id != task_id);
        }
    }

    pub(crate) fn append(&mut self, column_id: &str, task_id: &str) {
        if let Some(column) = self.columns.get_mut(column_id) {
            column.task_ids.push(task_id.to_string());
        }
    }

    /// Tasks present in `tasks` but held by no column. Only an edit to a
    /// status with no matching column produces these.
    pub fn orphaned_tasks(&self) -> Vec<&str> {
        let mut orphans = self
            .tasks
            .keys()
            .filter(|id| self.column_containing(id).is_none())
            .map(String::as_str)
            .collect::<Vec<_>>();
        orphans.sort_unstable();
        orphans
    }

    /// Every broken board invariant. Orphaned tasks are not violations.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                violations.push(InvariantViolation::UnknownColumnInOrder {
                    column_id: column_id.clone(),
                });
            }
        }

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                let Some(task) = self.tasks.get(task_id) else {
                    violations.push(InvariantViolation::DanglingTaskId {
                        column_id: column.id.clone(),
                        task_id: task_id.clone(),
                    });
                    continue;
                };

                if task.status != column.title {
                    violations.push(InvariantViolation::StatusMismatch {
                        task_id: task_id.clone(),
                        status: task.status.clone(),
                        column_title: column.title.clone(),
                    });
                }

                if let Some(previous) = seen.insert(task_id.as_str(), column.id.as_str()) {
                    violations.push(InvariantViolation::DuplicateMembership {
                        task_id: task_id.clone(),
                        first: previous.to_string(),
                        second: column.id.clone(),
                    });
                }
            }
        }

        violations
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    DanglingTaskId {
        column_id: String,
        task_id: String,
    },
    StatusMismatch {
        task_id: String,
        status: String,
        column_title: String,
    },
    DuplicateMembership {
        task_id: String,
        first: String,
        second: String,
    },
    UnknownColumnInOrder {
        column_id: String,
    },
}

// ========== FILTER / SORT ==========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Priority,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Where tasks without a due date land when sorting by due date. Applies in
/// both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndatedPlacement {
    #[default]
    Last,
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
    pub undated: UndatedPlacement,
}

impl SortSpec {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key,
            direction,
            undated: UndatedPlacement::default(),
        }
    }
}

/// Read-side filter; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardFilter {
    pub priority: Option<Priority>,
    pub category: Option<TaskCategory>,
    pub sort: Option<SortSpec>,
}

/// One column of the derived board view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub column_id: &'a str,
    pub title: &'a str,
    pub tasks: Vec<&'a Task>,
}

impl ColumnView<'_> {
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }
}
