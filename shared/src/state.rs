use std::sync::Arc;

use dao_atoms::proposals::{InMemoryProposalStore, Proposal, ProposalLoader, ProposalRepository};
use taskboard_block::{FileStorage, KeyValueStore, MemoryStorage, TaskBoard};

use crate::config::AppConfig;
use crate::detail::ProposalSession;
use crate::governance::GovernanceView;
use crate::wallet::{MockWallet, WalletConnector};

/// Everything the views share. Cloning is cheap; every handle is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub proposals: Arc<dyn ProposalRepository>,
    pub wallet: Arc<dyn WalletConnector>,
    pub board_storage: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Seeded proposal store, mock wallet, board persisted under
    /// `config.storage_dir`.
    pub fn from_config(config: AppConfig) -> Self {
        let board_storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        tracing::info!("Board storage at {}", board_storage.dir().display());
        Self::with_storage(config, board_storage)
    }

    /// Like [`AppState::from_config`] but nothing touches the disk.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    pub fn with_storage(config: AppConfig, board_storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            config,
            proposals: Arc::new(InMemoryProposalStore::seeded()),
            wallet: Arc::new(MockWallet::new()),
            board_storage,
        }
    }

    pub fn loader(&self) -> ProposalLoader {
        ProposalLoader::new(self.proposals.clone(), self.config.loader_latency)
    }

    pub fn governance(&self) -> GovernanceView {
        GovernanceView::new(self.proposals.clone(), self.config.admin_address.clone())
    }

    pub fn session(&self, proposal: Proposal) -> ProposalSession {
        ProposalSession::new(
            proposal,
            self.proposals.clone(),
            self.wallet.clone(),
            self.config.vote_latency,
        )
    }

    pub fn open_board(&self) -> TaskBoard {
        TaskBoard::open(self.board_storage.clone(), self.config.session_user.clone())
    }
}
