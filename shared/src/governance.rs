use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use dao_atoms::proposals::{
    CreateProposalPayload, Proposal, ProposalError, ProposalRepository, ProposalStatus, ViewerVoting,
    VoteTally,
};

/// Group order of the governance list.
pub const STATUS_SORT_ORDER: [ProposalStatus; 5] = [
    ProposalStatus::Active,
    ProposalStatus::Pending,
    ProposalStatus::Executed,
    ProposalStatus::Failed,
    ProposalStatus::Cancelled,
];

const DEFAULT_GUILD: &str = "General";

/// Filtered, ordered list of proposals plus the create-proposal action.
pub struct GovernanceView {
    repo: Arc<dyn ProposalRepository>,
    selected: HashSet<ProposalStatus>,
    admin_address: String,
}

impl GovernanceView {
    /// All statuses start selected.
    pub fn new(repo: Arc<dyn ProposalRepository>, admin_address: impl Into<String>) -> Self {
        Self {
            repo,
            selected: ProposalStatus::ALL.iter().copied().collect(),
            admin_address: admin_address.into(),
        }
    }

    pub fn is_selected(&self, status: ProposalStatus) -> bool {
        self.selected.contains(&status)
    }

    pub fn set_status_selected(&mut self, status: ProposalStatus, selected: bool) {
        if selected {
            self.selected.insert(status);
        } else {
            self.selected.remove(&status);
        }
    }

    /// Proposals whose status is selected, in list order. Reads the
    /// repository on every call, so writes made elsewhere show up here.
    pub fn visible(&self) -> Vec<Proposal> {
        let mut proposals = self
            .repo
            .list()
            .into_iter()
            .filter(|p| self.selected.contains(&p.status))
            .collect::<Vec<_>>();
        sort_proposals(&mut proposals);
        proposals
    }

    pub fn create_proposal(&self, payload: CreateProposalPayload) -> Result<Proposal, ProposalError> {
        let title = payload.title.trim();
        if title.is_empty() {
            return Err(ProposalError::MissingInput("title"));
        }
        let voting_deadline = payload
            .voting_deadline
            .ok_or(ProposalError::MissingInput("voting deadline"))?;

        let guild = payload
            .guild
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .unwrap_or(DEFAULT_GUILD);

        let proposal = Proposal {
            id: new_proposal_id(),
            title: title.to_string(),
            status: ProposalStatus::Pending,
            creator_address: self.admin_address.clone(),
            guild: guild.to_string(),
            voting_deadline,
            created_at: Utc::now(),
            executed_at: None,
            description_html: payload.description_html.trim().to_string(),
            actions: Vec::new(),
            voting: ViewerVoting::default(),
            vote_results: VoteTally::default(),
            comments: Vec::new(),
            connected_wallet: None,
        };

        self.repo.upsert(proposal.clone());
        tracing::info!("Proposal created: {} ({})", proposal.id, proposal.title);
        Ok(proposal)
    }
}

/// Stable sort by status group, then by date: soonest deadline first for
/// open groups, most recent first for terminal ones.
pub fn sort_proposals(proposals: &mut [Proposal]) {
    proposals.sort_by(|a, b| {
        group_rank(a.status)
            .cmp(&group_rank(b.status))
            .then_with(|| match a.status {
                ProposalStatus::Active | ProposalStatus::Pending => a.sort_date().cmp(&b.sort_date()),
                _ => b.sort_date().cmp(&a.sort_date()),
            })
    });
}

fn group_rank(status: ProposalStatus) -> usize {
    STATUS_SORT_ORDER
        .iter()
        .position(|s| *s == status)
        .unwrap_or(STATUS_SORT_ORDER.len())
}

/// `PROP-<unix millis>-<5 uppercase alphanumerics>`
fn new_proposal_id() -> String {
    let suffix = uuid::Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(5)
        .collect::<String>()
        .to_uppercase();
    format!("PROP-{}-{}", Utc::now().timestamp_millis(), suffix)
}
