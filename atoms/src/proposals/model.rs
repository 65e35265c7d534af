use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::ProposalStatus;

/// Proposal domain model - a governance item voted on by DAO members.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub status: ProposalStatus,
    pub creator_address: String,
    pub guild: String,
    pub voting_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,

    /// Only ever set while `status` is Executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,

    pub description_html: String,
    #[serde(default)]
    pub actions: Vec<ProposalAction>,
    pub voting: ViewerVoting,
    pub vote_results: VoteTally,
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Account the scenario assumes is connected, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_wallet: Option<String>,
}

impl Proposal {
    /// Date the governance list orders by: execution time for executed
    /// proposals, the voting deadline otherwise.
    pub fn sort_date(&self) -> DateTime<Utc> {
        match (self.status, self.executed_at) {
            (ProposalStatus::Executed, Some(executed_at)) => executed_at,
            _ => self.voting_deadline,
        }
    }
}

/// On-chain call the proposal would make if executed. Immutable once created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProposalAction {
    pub target_address: String,
    pub function_signature: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Approve,
    Reject,
    Abstain,
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VoteChoice::Approve => "approve",
            VoteChoice::Reject => "reject",
            VoteChoice::Abstain => "abstain",
        })
    }
}

/// Voting state as seen by the current viewer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewerVoting {
    pub is_voting_open: bool,
    pub has_voted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_vote_choice: Option<VoteChoice>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    pub approve_votes: u64,
    pub reject_votes: u64,
    pub abstain_votes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_voting_power: Option<u64>,
    /// Fraction of total voting power, e.g. 0.2 for 20%
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quorum_threshold: Option<f64>,
}

/// Derived numbers for the results panel. Percentages carry one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteSummary {
    pub total_cast: u64,
    pub approve_pct: f64,
    pub reject_pct: f64,
    pub abstain_pct: f64,
    pub turnout_pct: Option<f64>,
    pub quorum_met: Option<bool>,
}

impl VoteTally {
    pub fn total_cast(&self) -> u64 {
        self.approve_votes + self.reject_votes + self.abstain_votes
    }

    pub fn summary(&self) -> VoteSummary {
        let total_cast = self.total_cast();
        let turnout_pct = self
            .total_voting_power
            .filter(|power| *power > 0)
            .map(|power| percentage(total_cast, power));
        let quorum_met = match (turnout_pct, self.quorum_threshold) {
            (Some(turnout), Some(threshold)) => Some(turnout >= threshold * 100.0),
            _ => None,
        };

        VoteSummary {
            total_cast,
            approve_pct: percentage(self.approve_votes, total_cast),
            reject_pct: percentage(self.reject_votes, total_cast),
            abstain_pct: percentage(self.abstain_votes, total_cast),
            turnout_pct,
            quorum_met,
        }
    }
}

fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = votes as f64 / total as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub address: String,
    pub avatar_fallback: String,
    pub content: String,
    /// Display string ("6 hours ago"), not a parsed time.
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub is_reply: bool,
}

impl Comment {
    pub fn new(address: impl Into<String>, content: impl Into<String>) -> Self {
        let address = address.into();
        let avatar_fallback = address
            .trim_start_matches("0x")
            .chars()
            .take(2)
            .collect::<String>()
            .to_uppercase();
        Self {
            address,
            avatar_fallback,
            content: content.into(),
            timestamp: "just now".to_string(),
            likes: 0,
            is_reply: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CreateProposalPayload {
    pub title: String,
    #[serde(default)]
    pub description_html: String,
    pub guild: Option<String>,
    pub voting_deadline: Option<DateTime<Utc>>,
}
