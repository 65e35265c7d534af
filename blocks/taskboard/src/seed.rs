use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use dao_atoms::tasks::{Column, Priority, Task, TaskCategory};
use dao_atoms::users::User;

use crate::types::BoardState;

/// Current time truncated to the millisecond precision the blob stores.
pub(crate) fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.timestamp_millis_opt(now.timestamp_millis())
        .single()
        .unwrap_or(now)
}

fn column(id: &str, title: &str, task_ids: &[&str]) -> (String, Column) {
    let mut column = Column::new(id, title);
    column.task_ids = task_ids.iter().map(|id| id.to_string()).collect();
    (id.to_string(), column)
}

/// Board used when nothing usable is stored.
pub fn default_board() -> BoardState {
    let me = User::mock_current();
    let others = User::mock_others();
    let now = now_millis();

    let task = |id: &str, title: &str, description: &str, status: &str, priority: Priority, age_ms: i64| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status: status.to_string(),
        priority,
        due_date: None,
        assignees: Vec::new(),
        tags: Vec::new(),
        progress: Some(0),
        created_at: now - Duration::milliseconds(age_ms),
        created_by: String::new(),
        category: None,
        proposal_id: None,
        reward: None,
    };

    let tasks = vec![
        Task {
            due_date: NaiveDate::from_ymd_opt(2024, 9, 15),
            assignees: vec![others[0].clone()],
            tags: vec!["design".into(), "UI/UX".into()],
            progress: Some(10),
            created_by: others[0].id.clone(),
            category: Some(TaskCategory::CoreDevelopment),
            proposal_id: Some("PROP-001".into()),
            reward: Some("500 USDC".into()),
            ..task(
                "task-1",
                "Design new landing page",
                "Create mockups for the new DAO platform landing page.",
                "To Do",
                Priority::High,
                500_000,
            )
        },
        Task {
            due_date: NaiveDate::from_ymd_opt(2024, 10, 1),
            tags: vec!["blockchain".into(), "solidity".into()],
            created_by: others[1].id.clone(),
            category: Some(TaskCategory::CoreDevelopment),
            reward: Some("1 ETH".into()),
            ..task(
                "task-2",
                "Develop smart contract for voting",
                "Implement the core logic for proposal voting.",
                "To Do",
                Priority::High,
                400_000,
            )
        },
        Task {
            due_date: NaiveDate::from_ymd_opt(2024, 8, 30),
            assignees: vec![me.clone(), others[2].clone()],
            tags: vec!["community".into()],
            progress: Some(60),
            created_by: me.id.clone(),
            category: Some(TaskCategory::CommunityInitiative),
            ..task(
                "task-3",
                "Set up Discord server",
                "Configure channels and bots for community.",
                "In Progress",
                Priority::Medium,
                300_000,
            )
        },
        Task {
            tags: vec!["testing".into(), "ux".into()],
            progress: Some(30),
            created_by: me.id.clone(),
            category: Some(TaskCategory::CommunityInitiative),
            reward: Some("Reputation Points".into()),
            ..task(
                "task-5",
                "User testing for governance module",
                "Recruit members for testing and feedback.",
                "In Progress",
                Priority::Medium,
                100_000,
            )
        },
    ];

    let columns = [
        column("column-1", "To Do", &["task-1", "task-2"]),
        column("column-2", "In Progress", &["task-3", "task-5"]),
        column("column-4", "In Review", &[]),
        column("column-3", "Done", &[]),
    ];

    BoardState {
        tasks: tasks.into_iter().map(|t| (t.id.clone(), t)).collect::<HashMap<_, _>>(),
        columns: columns.into_iter().collect(),
        column_order: ["column-1", "column-2", "column-4", "column-3"]
            .iter()
            .map(|id| id.to_string())
            .collect(),
    }
}
