use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tokio::sync::watch;

use super::error::ProposalError;
use super::lifecycle::ProposalStatus;
use super::model::{Comment, Proposal};

/// Keyed proposal collection read by every governance view.
///
/// Consumers hold it as `Arc<dyn ProposalRepository>` so a real backend can
/// replace the in-memory store without touching the views.
pub trait ProposalRepository: Send + Sync {
    fn get(&self, id: &str) -> Option<Proposal>;

    /// All records, ordered by id.
    fn list(&self) -> Vec<Proposal>;

    /// Insert or wholesale replace a record.
    fn upsert(&self, proposal: Proposal);

    /// Move a proposal along its lifecycle. Rejects transitions the policy
    /// does not allow.
    fn set_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, ProposalError>;

    fn add_comment(&self, id: &str, comment: Comment) -> Result<Proposal, ProposalError>;

    /// Revision counter bumped on every write.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

pub struct InMemoryProposalStore {
    records: RwLock<BTreeMap<String, Proposal>>,
    revision: watch::Sender<u64>,
}

impl InMemoryProposalStore {
    pub fn new() -> Self {
        Self::with_proposals(Vec::new())
    }

    pub fn with_proposals(proposals: impl IntoIterator<Item = Proposal>) -> Self {
        let records = proposals
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect::<BTreeMap<_, _>>();
        let (revision, _) = watch::channel(0);
        Self {
            records: RwLock::new(records),
            revision,
        }
    }

    /// Store preloaded with the mock governance data set.
    pub fn seeded() -> Self {
        Self::with_proposals(super::seed::mock_proposals())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Proposal>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Proposal>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl Default for InMemoryProposalStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalRepository for InMemoryProposalStore {
    fn get(&self, id: &str) -> Option<Proposal> {
        self.read().get(id).cloned()
    }

    fn list(&self) -> Vec<Proposal> {
        self.read().values().cloned().collect()
    }

    fn upsert(&self, proposal: Proposal) {
        tracing::debug!("Upserting proposal {}", proposal.id);
        self.write().insert(proposal.id.clone(), proposal);
        self.bump();
    }

    fn set_status(&self, id: &str, status: ProposalStatus) -> Result<Proposal, ProposalError> {
        let updated = {
            let mut records = self.write();
            let proposal = records
                .get_mut(id)
                .ok_or_else(|| ProposalError::NotFound(id.to_string()))?;

            let from = proposal.status;
            if !from.can_transition_to(status) {
                return Err(ProposalError::InvalidTransition {
                    id: id.to_string(),
                    from,
                    to: status,
                });
            }

            proposal.status = status;
            proposal.voting.is_voting_open = status == ProposalStatus::Active;
            proposal.executed_at = match status {
                ProposalStatus::Executed => Some(Utc::now()),
                _ => None,
            };

            tracing::info!("Proposal {} status changed: {} -> {}", id, from, status);
            proposal.clone()
        };

        self.bump();
        Ok(updated)
    }

    fn add_comment(&self, id: &str, comment: Comment) -> Result<Proposal, ProposalError> {
        let updated = {
            let mut records = self.write();
            let proposal = records
                .get_mut(id)
                .ok_or_else(|| ProposalError::NotFound(id.to_string()))?;
            proposal.comments.push(comment);
            proposal.clone()
        };

        self.bump();
        Ok(updated)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
