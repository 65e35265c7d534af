use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

pub const MOCK_WALLET_ACCOUNT: &str = "0xMockUserWallet123...";
pub const MOCK_CHAIN_ID: &str = "0x1";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    pub account: String,
    pub chain_id: String,
}

/// Source of the viewer's account. Only identity is exposed; signing and
/// chain calls are out of reach of this crate.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn connect(&self) -> Result<WalletAccount, WalletError>;

    async fn disconnect(&self) -> Result<(), WalletError>;
}

/// Hands out a fixed account, or refuses every connection when built with
/// [`MockWallet::rejecting`].
#[derive(Debug, Clone)]
pub struct MockWallet {
    account: WalletAccount,
    reject: bool,
}

impl MockWallet {
    pub fn new() -> Self {
        Self::with_account(MOCK_WALLET_ACCOUNT, MOCK_CHAIN_ID)
    }

    pub fn with_account(account: impl Into<String>, chain_id: impl Into<String>) -> Self {
        Self {
            account: WalletAccount {
                account: account.into(),
                chain_id: chain_id.into(),
            },
            reject: false,
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::new()
        }
    }
}

impl Default for MockWallet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn connect(&self) -> Result<WalletAccount, WalletError> {
        if self.reject {
            return Err(WalletError::Rejected("user denied account access".to_string()));
        }
        tracing::debug!("Mock wallet connected: {}", self.account.account);
        Ok(self.account.clone())
    }

    async fn disconnect(&self) -> Result<(), WalletError> {
        tracing::debug!("Mock wallet disconnected");
        Ok(())
    }
}
