use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dao_atoms::users::User;

use crate::error::ConfigError;

pub const DEFAULT_STORAGE_DIR: &str = ".dao-storage";
pub const DEFAULT_LOADER_LATENCY_MS: u64 = 500;
pub const DEFAULT_VOTE_LATENCY_MS: u64 = 1200;
pub const DEFAULT_ADMIN_ADDRESS: &str = "0xAdminMockAddress0000000000000000000";

/// Runtime settings, read from `DAO_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory backing the board's key/value store.
    pub storage_dir: PathBuf,
    pub loader_latency: Duration,
    pub vote_latency: Duration,
    /// Recorded as creator of proposals made from the governance list.
    pub admin_address: String,
    pub session_user: User,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            loader_latency: Duration::from_millis(DEFAULT_LOADER_LATENCY_MS),
            vote_latency: Duration::from_millis(DEFAULT_VOTE_LATENCY_MS),
            admin_address: DEFAULT_ADMIN_ADDRESS.to_string(),
            session_user: User::mock_current(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_dir = match lookup("DAO_STORAGE_DIR") {
            Some(dir) if dir.trim().is_empty() => return Err(ConfigError::Blank("DAO_STORAGE_DIR")),
            Some(dir) => PathBuf::from(dir),
            None => defaults.storage_dir,
        };

        let admin_address = match lookup("DAO_ADMIN_ADDRESS") {
            Some(addr) if addr.trim().is_empty() => return Err(ConfigError::Blank("DAO_ADMIN_ADDRESS")),
            Some(addr) => addr.trim().to_string(),
            None => defaults.admin_address,
        };

        let mut session_user = defaults.session_user;
        if let Some(id) = lookup("DAO_SESSION_USER_ID") {
            session_user.id = id;
        }
        if let Some(name) = lookup("DAO_SESSION_USER_NAME") {
            session_user.name = name;
        }
        if let Some(avatar) = lookup("DAO_SESSION_USER_AVATAR") {
            session_user.avatar = Some(avatar).filter(|a| !a.trim().is_empty());
        }

        Ok(Self {
            storage_dir,
            loader_latency: millis(&lookup, "DAO_LOADER_LATENCY_MS", DEFAULT_LOADER_LATENCY_MS)?,
            vote_latency: millis(&lookup, "DAO_VOTE_LATENCY_MS", DEFAULT_VOTE_LATENCY_MS)?,
            admin_address,
            session_user,
        })
    }
}

fn millis<F>(lookup: &F, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(Duration::from_millis(default)),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}
