//! Proposal lifecycle policy.
//!
//! ```text
//! Pending ──► Active ──► Executed
//!    │          ├──────► Failed
//!    └──────────┴──────► Cancelled
//! ```
//!
//! Transitions are triggered manually by an admin action; nothing advances a
//! proposal on its own.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ProposalError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    Pending,
    Active,
    Executed,
    Failed,
    Cancelled,
}

/// Display label plus the style tag the front end keys its badge colours on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub style: &'static str,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 5] = [
        ProposalStatus::Pending,
        ProposalStatus::Active,
        ProposalStatus::Executed,
        ProposalStatus::Failed,
        ProposalStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProposalStatus::Pending => "Pending",
            ProposalStatus::Active => "Active",
            ProposalStatus::Executed => "Executed",
            ProposalStatus::Failed => "Failed",
            ProposalStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge(self) -> Badge {
        match self {
            ProposalStatus::Pending => Badge {
                label: "Pending",
                style: "badge-proposal-pending",
            },
            ProposalStatus::Active => Badge {
                label: "Open for Voting",
                style: "badge-proposal-active",
            },
            ProposalStatus::Executed => Badge {
                label: "Executed",
                style: "badge-proposal-executed",
            },
            ProposalStatus::Failed => Badge {
                label: "Rejected",
                style: "badge-proposal-failed",
            },
            ProposalStatus::Cancelled => Badge {
                label: "Cancelled",
                style: "badge-proposal-cancelled",
            },
        }
    }

    /// Statuses an admin may move a proposal to from `self`.
    pub fn available_transitions(self) -> &'static [ProposalStatus] {
        match self {
            ProposalStatus::Pending => &[ProposalStatus::Active, ProposalStatus::Cancelled],
            ProposalStatus::Active => &[
                ProposalStatus::Executed,
                ProposalStatus::Failed,
                ProposalStatus::Cancelled,
            ],
            ProposalStatus::Executed | ProposalStatus::Failed | ProposalStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, to: ProposalStatus) -> bool {
        self.available_transitions().contains(&to)
    }

    pub fn is_terminal(self) -> bool {
        self.available_transitions().is_empty()
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalStatus {
    type Err = ProposalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProposalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ProposalError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProposalStatus::*;

    #[test]
    fn transitions_match_policy_table() {
        assert_eq!(Pending.available_transitions(), &[Active, Cancelled]);
        assert_eq!(Active.available_transitions(), &[Executed, Failed, Cancelled]);
        for terminal in [Executed, Failed, Cancelled] {
            assert!(terminal.available_transitions().is_empty());
            assert!(terminal.is_terminal());
        }
        assert!(!Pending.is_terminal());
        assert!(!Active.is_terminal());
    }

    #[test]
    fn can_transition_to_rejects_skips_and_reversals() {
        assert!(Pending.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Executed));
        assert!(!Active.can_transition_to(Pending));
        assert!(!Executed.can_transition_to(Active));
        assert!(!Active.can_transition_to(Active));
    }

    #[test]
    fn badges_use_display_labels() {
        assert_eq!(Active.badge().label, "Open for Voting");
        assert_eq!(Failed.badge().label, "Rejected");
        assert_eq!(Cancelled.badge().style, "badge-proposal-cancelled");
        for status in ProposalStatus::ALL {
            assert!(status.badge().style.starts_with("badge-proposal-"));
        }
    }

    #[test]
    fn unknown_status_fails_loudly() {
        assert_eq!("Executed".parse::<ProposalStatus>(), Ok(Executed));
        assert_eq!(
            "Archived".parse::<ProposalStatus>(),
            Err(ProposalError::UnknownStatus("Archived".to_string()))
        );
        assert!("pending".parse::<ProposalStatus>().is_err());

        let err = serde_json::from_str::<ProposalStatus>("\"Archived\"");
        assert!(err.is_err());
    }
}
