use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::users::User;

/// Task domain model - a unit of work on the board.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// Mirrors the title of the column that currently holds the task.
    pub status: String,
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "blank_date_as_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub assignees: Vec<User>,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Percentage, 0..=100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub created_by: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,

    /// Weak link to a governance proposal; never checked against the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignees.iter().any(|a| a.id == user_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort ordinal: High sorts before Medium, Medium before Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskCategory {
    #[default]
    #[serde(rename = "Core Development")]
    CoreDevelopment,
    #[serde(rename = "Community Initiative")]
    CommunityInitiative,
    #[serde(rename = "Documentation")]
    Documentation,
    #[serde(rename = "Bug Fix")]
    BugFix,
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "Marketing")]
    Marketing,
    #[serde(rename = "Bounty")]
    Bounty,
    #[serde(rename = "Design")]
    Design,
    #[serde(rename = "Governance Action")]
    GovernanceAction,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 9] = [
        TaskCategory::CoreDevelopment,
        TaskCategory::CommunityInitiative,
        TaskCategory::Documentation,
        TaskCategory::BugFix,
        TaskCategory::Research,
        TaskCategory::Marketing,
        TaskCategory::Bounty,
        TaskCategory::Design,
        TaskCategory::GovernanceAction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::CoreDevelopment => "Core Development",
            TaskCategory::CommunityInitiative => "Community Initiative",
            TaskCategory::Documentation => "Documentation",
            TaskCategory::BugFix => "Bug Fix",
            TaskCategory::Research => "Research",
            TaskCategory::Marketing => "Marketing",
            TaskCategory::Bounty => "Bounty",
            TaskCategory::Design => "Design",
            TaskCategory::GovernanceAction => "Governance Action",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateTaskPayload {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<TaskCategory>,
    pub proposal_id: Option<String>,
    pub reward: Option<String>,

    /// Column to create the task in; the first board column when absent or stale.
    pub column_id: Option<String>,
}

/// Full replacement of a task's mutable fields. Identity, creation time and
/// creator are never touched by an edit.
#[derive(Debug, Deserialize, Clone)]
pub struct UpdateTaskPayload {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub category: Option<TaskCategory>,
    pub tags: Vec<String>,
    pub proposal_id: Option<String>,
    pub reward: Option<String>,
    pub progress: Option<u8>,
    pub assignees: Vec<User>,
}

impl From<&Task> for UpdateTaskPayload {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.clone(),
            priority: task.priority,
            due_date: task.due_date,
            category: task.category,
            tags: task.tags.clone(),
            proposal_id: task.proposal_id.clone(),
            reward: task.reward.clone(),
            progress: task.progress,
            assignees: task.assignees.clone(),
        }
    }
}

/// A cleared date input is stored as `""`; read it back as no date.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => date.parse::<NaiveDate>().map(Some).map_err(serde::de::Error::custom),
    }
}
