use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use super::error::ProposalError;
use super::model::Proposal;
use super::store::ProposalRepository;

/// Loading / error / data, as exposed to a proposal view.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Failed(ProposalError),
    Ready(Box<Proposal>),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn proposal(&self) -> Option<&Proposal> {
        match self {
            LoadState::Ready(proposal) => Some(proposal),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProposalError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<Result<Proposal, ProposalError>> for LoadState {
    fn from(result: Result<Proposal, ProposalError>) -> Self {
        match result {
            Ok(proposal) => LoadState::Ready(Box::new(proposal)),
            Err(err) => LoadState::Failed(err),
        }
    }
}

/// Fetches one proposal after a simulated network delay.
///
/// Every call re-reads the repository, so a load issued after an admin
/// action sees that action's result. Dropping the future abandons the load.
#[derive(Clone)]
pub struct ProposalLoader {
    repo: Arc<dyn ProposalRepository>,
    latency: Duration,
}

impl ProposalLoader {
    pub fn new(repo: Arc<dyn ProposalRepository>, latency: Duration) -> Self {
        Self { repo, latency }
    }

    pub async fn load(&self, proposal_id: Option<&str>) -> Result<Proposal, ProposalError> {
        let id = match proposal_id.map(str::trim) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ProposalError::MissingId),
        };

        sleep(self.latency).await;

        tracing::debug!("Loading proposal {}", id);
        self.repo
            .get(id)
            .ok_or_else(|| ProposalError::NotFound(id.to_string()))
    }

    pub async fn load_state(&self, proposal_id: Option<&str>) -> LoadState {
        self.load(proposal_id).await.into()
    }
}
