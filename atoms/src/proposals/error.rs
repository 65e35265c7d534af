use thiserror::Error;

use super::lifecycle::ProposalStatus;

/// Failures surfaced to the user by proposal reads and admin actions. None of
/// them are fatal; the caller may retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProposalError {
    #[error("No proposal ID provided.")]
    MissingId,

    #[error("Proposal with ID \"{0}\" not found.")]
    NotFound(String),

    #[error("Please fill in the {0}.")]
    MissingInput(&'static str),

    #[error("Unknown proposal status: {0}")]
    UnknownStatus(String),

    #[error("Cannot change proposal \"{id}\" from \"{from}\" to \"{to}\".")]
    InvalidTransition {
        id: String,
        from: ProposalStatus,
        to: ProposalStatus,
    },
}
