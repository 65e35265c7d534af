pub mod config;
pub mod detail;
pub mod error;
pub mod governance;
pub mod state;
pub mod utils;
pub mod wallet;

pub use config::AppConfig;
pub use detail::ProposalSession;
pub use error::{ConfigError, SessionError, WalletError};
pub use governance::GovernanceView;
pub use state::AppState;
pub use utils::shorten_address;
pub use wallet::{MockWallet, WalletAccount, WalletConnector};
