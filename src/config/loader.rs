//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! defaults, so an empty file targets the public TestNet.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::adapters::algod::{AlgodClient, AlgodConfig, TESTNET_ALGOD_URL};
use crate::adapters::indexer::{IndexerClient, IndexerConfig, TESTNET_INDEXER_URL};
use crate::application::DEFAULT_CONFIRMATION_ROUNDS;
use crate::domain::{ContractError, ContractRegistry};
use crate::ports::LedgerResult;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub confirmation: ConfirmationSection,
    #[serde(default)]
    pub contracts: ContractRegistry,
    #[serde(default)]
    pub wallet: WalletSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Node and indexer endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    pub algod_url: String,
    pub indexer_url: String,
    /// Shared API token; empty for public endpoints
    pub api_token: String,
    pub request_timeout_secs: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            algod_url: TESTNET_ALGOD_URL.to_string(),
            indexer_url: TESTNET_INDEXER_URL.to_string(),
            api_token: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl NetworkSection {
    /// Build a node client. Each call returns a fresh client.
    pub fn algod_client(&self) -> LedgerResult<AlgodClient> {
        AlgodClient::with_config(AlgodConfig {
            base_url: self.algod_url.clone(),
            token: self.api_token.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }

    /// Build an indexer client. Each call returns a fresh client.
    pub fn indexer_client(&self) -> LedgerResult<IndexerClient> {
        IndexerClient::with_config(IndexerConfig {
            base_url: self.indexer_url.clone(),
            token: self.api_token.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }

    /// Apply ALGOD_URL / INDEXER_URL / ALGOD_TOKEN environment overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ALGOD_URL") {
            self.algod_url = url;
        }
        if let Ok(url) = std::env::var("INDEXER_URL") {
            self.indexer_url = url;
        }
        if let Ok(token) = std::env::var("ALGOD_TOKEN") {
            self.api_token = token;
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfirmationSection {
    /// Rounds to wait for a submitted transaction
    pub timeout_rounds: u64,
}

impl Default for ConfirmationSection {
    fn default() -> Self {
        Self {
            timeout_rounds: DEFAULT_CONFIRMATION_ROUNDS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WalletSection {
    /// Local signing key (JSON byte array)
    pub keypair_path: String,
}

impl Default for WalletSection {
    fn default() -> Self {
        Self {
            keypair_path: "~/.config/algohealx/wallet.json".to_string(),
        }
    }
}

impl WalletSection {
    /// Keypair path with ALGOHEALX_KEYPAIR_PATH override and `~` expanded
    pub fn get_keypair_path(&self) -> String {
        let path = std::env::var("ALGOHEALX_KEYPAIR_PATH")
            .unwrap_or_else(|_| self.keypair_path.clone());
        shellexpand::tilde(&path).to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error(transparent)]
    ContractError(#[from] ContractError),
}

/// Load configuration from a TOML file, then apply environment overrides
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.network.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to TestNet defaults
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    if path.as_ref().exists() {
        return load_config(path);
    }

    tracing::debug!("No config at {}, using TestNet defaults", path.as_ref().display());
    let mut config = Config::default();
    config.network.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

impl Config {
    /// App id for a numeric id or a symbolic contract name
    pub fn resolve_app(&self, app: &str) -> Result<u64, ConfigError> {
        Ok(self.contracts.resolve(app)?)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("algod_url", &self.network.algod_url)?;
        validate_url("indexer_url", &self.network.indexer_url)?;

        if self.network.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be > 0".to_string(),
            ));
        }

        if self.confirmation.timeout_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_rounds must be > 0".to_string(),
            ));
        }

        if self.wallet.keypair_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "keypair_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_url(name: &str, url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::ValidationError(format!("{} cannot be empty", name)));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "{} must be an http(s) URL, got {}",
            name, url
        )));
    }
    Ok(())
}
