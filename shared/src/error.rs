use dao_atoms::proposals::ProposalError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number of milliseconds, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{0} must not be blank")]
    Blank(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Wallet connection rejected: {0}")]
    Rejected(String),
}

/// Failures of the proposal detail interactions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please connect your wallet to vote.")]
    WalletNotConnected,

    #[error("Voting is closed for proposal {0}")]
    VotingClosed(String),

    #[error("A vote has already been submitted for proposal {0}")]
    AlreadyVoted(String),

    #[error("Please select a valid next status.")]
    NoStatusSelected,

    #[error(transparent)]
    Proposal(#[from] ProposalError),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}
