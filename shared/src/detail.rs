use std::sync::Arc;
use std::time::Duration;

use dao_atoms::proposals::{
    Comment, Proposal, ProposalError, ProposalRepository, ProposalStatus, VoteChoice, VoteSummary,
};

use crate::error::SessionError;
use crate::utils::shorten_address;
use crate::wallet::{WalletAccount, WalletConnector};

/// Interaction state for one loaded proposal: the viewer's vote, the admin
/// status change, comments and the connected wallet.
///
/// Votes only touch this session. Status changes and comments are written
/// through the repository, and the local copy is replaced with the stored one.
pub struct ProposalSession {
    repo: Arc<dyn ProposalRepository>,
    wallet: Arc<dyn WalletConnector>,
    proposal: Proposal,
    vote_choice: Option<VoteChoice>,
    has_voted: bool,
    submitting: bool,
    selected_next_status: Option<ProposalStatus>,
    account: Option<WalletAccount>,
    vote_latency: Duration,
}

impl ProposalSession {
    pub fn new(
        proposal: Proposal,
        repo: Arc<dyn ProposalRepository>,
        wallet: Arc<dyn WalletConnector>,
        vote_latency: Duration,
    ) -> Self {
        let mut session = Self {
            repo,
            wallet,
            proposal,
            vote_choice: None,
            has_voted: false,
            submitting: false,
            selected_next_status: None,
            account: None,
            vote_latency,
        };
        session.reset_interaction();
        session
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn vote_choice(&self) -> Option<VoteChoice> {
        self.vote_choice
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    /// True while a vote submission is in flight, or after one was abandoned
    /// before completing. Cleared by the next refresh.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn selected_next_status(&self) -> Option<ProposalStatus> {
        self.selected_next_status
    }

    pub fn connected_account(&self) -> Option<&str> {
        self.account.as_ref().map(|a| a.account.as_str())
    }

    /// Header label. Only a wallet connected in this session counts; the
    /// account recorded on the proposal is never shown here.
    pub fn wallet_label(&self) -> String {
        match self.connected_account() {
            Some(address) => format!("Wallet: {}", shorten_address(Some(address), 4)),
            None => "Wallet Not Connected".to_string(),
        }
    }

    pub async fn connect_wallet(&mut self) -> Result<&WalletAccount, SessionError> {
        let account = self.wallet.connect().await?;
        tracing::info!("Wallet connected: {}", shorten_address(Some(&account.account), 4));
        Ok(&*self.account.insert(account))
    }

    pub async fn disconnect_wallet(&mut self) -> Result<(), SessionError> {
        if self.account.is_some() {
            self.wallet.disconnect().await?;
            self.account = None;
            tracing::info!("Wallet disconnected");
        }
        Ok(())
    }

    /// Connect when disconnected and vice versa. Returns whether a wallet is
    /// connected afterwards.
    pub async fn toggle_wallet(&mut self) -> Result<bool, SessionError> {
        if self.account.is_some() {
            self.disconnect_wallet().await?;
            Ok(false)
        } else {
            self.connect_wallet().await?;
            Ok(true)
        }
    }

    /// Simulated vote transaction. Updates only this session; the stored
    /// tally is left alone.
    pub async fn submit_vote(&mut self, choice: VoteChoice) -> Result<VoteChoice, SessionError> {
        let Some(account) = self.connected_account().map(str::to_string) else {
            return Err(SessionError::WalletNotConnected);
        };
        if !self.proposal.voting.is_voting_open {
            return Err(SessionError::VotingClosed(self.proposal.id.clone()));
        }
        if self.has_voted {
            return Err(SessionError::AlreadyVoted(self.proposal.id.clone()));
        }

        tracing::info!("Vote by {} for {}: {}", account, self.proposal.id, choice);
        self.submitting = true;
        tokio::time::sleep(self.vote_latency).await;

        self.vote_choice = Some(choice);
        self.has_voted = true;
        self.submitting = false;
        tracing::info!(
            "Vote ({}) submitted successfully by {} for {}",
            choice,
            shorten_address(Some(&account), 4),
            self.proposal.title
        );
        Ok(choice)
    }

    /// Statuses the admin selector offers for the current status.
    pub fn available_next_statuses(&self) -> &'static [ProposalStatus] {
        self.proposal.status.available_transitions()
    }

    pub fn select_next_status(&mut self, next: Option<ProposalStatus>) -> Result<(), SessionError> {
        if let Some(to) = next {
            self.check_transition(to)?;
        }
        self.selected_next_status = next;
        Ok(())
    }

    /// Apply the selected status change. `confirm` sees (from, to) and can
    /// cancel; a cancelled change returns `Ok(false)` and keeps the selection.
    pub fn change_status<F>(&mut self, confirm: F) -> Result<bool, SessionError>
    where
        F: FnOnce(ProposalStatus, ProposalStatus) -> bool,
    {
        let to = self.selected_next_status.ok_or(SessionError::NoStatusSelected)?;
        let from = self.proposal.status;
        self.check_transition(to)?;

        if !confirm(from, to) {
            return Ok(false);
        }

        let updated = self.repo.set_status(&self.proposal.id, to)?;
        tracing::info!(
            "Proposal status successfully changed from \"{}\" to \"{}\"",
            from,
            updated.status
        );
        self.replace(updated);
        Ok(true)
    }

    pub fn post_comment(&mut self, text: &str) -> Result<Comment, SessionError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ProposalError::MissingInput("comment").into());
        }
        let author = self
            .connected_account()
            .ok_or(SessionError::WalletNotConnected)?;

        let comment = Comment::new(author, content);
        let updated = self.repo.add_comment(&self.proposal.id, comment.clone())?;
        tracing::info!("Comment posted on {}", updated.id);
        // Comments leave the vote interaction untouched.
        self.proposal = updated;
        Ok(comment)
    }

    /// Re-read the record from the repository.
    pub fn refresh(&mut self) -> Result<&Proposal, SessionError> {
        let fresh = self
            .repo
            .get(&self.proposal.id)
            .ok_or_else(|| ProposalError::NotFound(self.proposal.id.clone()))?;
        self.replace(fresh);
        Ok(&self.proposal)
    }

    pub fn results(&self) -> VoteSummary {
        self.proposal.vote_results.summary()
    }

    fn check_transition(&self, to: ProposalStatus) -> Result<(), SessionError> {
        let from = self.proposal.status;
        if from.can_transition_to(to) {
            Ok(())
        } else {
            Err(ProposalError::InvalidTransition {
                id: self.proposal.id.clone(),
                from,
                to,
            }
            .into())
        }
    }

    fn replace(&mut self, proposal: Proposal) {
        self.proposal = proposal;
        self.reset_interaction();
    }

    /// Vote state comes back from the record; pending selections are dropped.
    fn reset_interaction(&mut self) {
        self.vote_choice = self.proposal.voting.user_vote_choice;
        self.has_voted = self.proposal.voting.has_voted;
        self.selected_next_status = None;
        self.submitting = false;
    }
}
