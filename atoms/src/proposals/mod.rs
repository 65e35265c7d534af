// Re-export model types, lifecycle policy and store
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod model;
pub mod seed;
pub mod store;

pub use error::ProposalError;
pub use lifecycle::{Badge, ProposalStatus};
pub use loader::{LoadState, ProposalLoader};
pub use model::{
    Comment, CreateProposalPayload, Proposal, ProposalAction, ViewerVoting, VoteChoice, VoteSummary,
    VoteTally,
};
pub use store::{InMemoryProposalStore, ProposalRepository};
