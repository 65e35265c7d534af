use std::collections::HashSet;

use dao_atoms::proposals::{Proposal, ProposalStatus};
use dao_atoms::tasks::{Priority, Task, TaskCategory};
use dao_atoms::users::SYSTEM_GENERATED_USER_ID;

use crate::board::TaskBoard;
use crate::error::BoardError;
use crate::seed::now_millis;

impl TaskBoard {
    /// Generate one follow-up task per executed proposal that no task links
    /// to yet, appended to the first column. Safe to call repeatedly.
    ///
    /// Returns the number of tasks created.
    pub fn sync_executed_proposals(&mut self, proposals: &[Proposal]) -> Result<usize, BoardError> {
        let pending = {
            let mut linked: HashSet<&str> = self
                .state()
                .tasks
                .values()
                .filter_map(|t| t.proposal_id.as_deref())
                .collect();

            proposals
                .iter()
                .filter(|p| p.status == ProposalStatus::Executed)
                .filter(|p| linked.insert(p.id.as_str()))
                .collect::<Vec<_>>()
        };

        if pending.is_empty() {
            return Ok(0);
        }

        let Some(column_id) = self.state().first_column_id().map(str::to_string) else {
            tracing::warn!(
                "Cannot create tasks for {} executed proposals: default column not found",
                pending.len()
            );
            return Ok(0);
        };

        let mut next = self.state().clone();
        let status = next.columns[&column_id].title.clone();
        for proposal in &pending {
            let task = action_items_task(proposal, &status);
            tracing::info!("Generated task {} for executed proposal {}", task.id, proposal.id);
            next.append(&column_id, &task.id);
            next.tasks.insert(task.id.clone(), task);
        }
        self.commit(next)?;

        Ok(pending.len())
    }
}

fn action_items_task(proposal: &Proposal, status: &str) -> Task {
    Task {
        id: format!("task-prop-{}-{}", proposal.id, uuid::Uuid::new_v4().simple()),
        title: format!("Action Items: {}", proposal.title),
        description: format!(
            "Auto-generated task for successfully executed proposal: {} (ID: {}). Review proposal details for required actions.",
            proposal.title, proposal.id
        ),
        status: status.to_string(),
        priority: Priority::Medium,
        due_date: None,
        assignees: Vec::new(),
        tags: vec!["proposal-action".to_string(), guild_tag(&proposal.guild)],
        progress: Some(0),
        created_at: now_millis(),
        created_by: SYSTEM_GENERATED_USER_ID.to_string(),
        category: Some(TaskCategory::GovernanceAction),
        proposal_id: Some(proposal.id.clone()),
        reward: None,
    }
}

/// "Protocol Engineering" -> "protocol-engineering"; blank -> "general".
fn guild_tag(guild: &str) -> String {
    let slug = guild
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    if slug.is_empty() {
        "general".to_string()
    } else {
        slug
    }
}
