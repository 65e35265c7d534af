use dao_atoms::proposals::ProposalError;
use dao_shared::SessionError;
use taskboard_block::BoardError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Proposal(#[from] ProposalError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
