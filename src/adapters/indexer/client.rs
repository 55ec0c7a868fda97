//! Indexer API Client

use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::http::RestClient;
use crate::ports::models::{
    IndexerAccountResponse, IndexerApplicationResponse, IndexerHealth, LedgerResult,
};
use crate::ports::IndexerPort;

/// Public TestNet indexer
pub const TESTNET_INDEXER_URL: &str = "https://testnet-idx.algonode.cloud";

const TOKEN_HEADER: &str = "X-Indexer-API-Token";

#[derive(Debug, Clone)]
pub struct IndexerConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_INDEXER_URL.to_string(),
            token: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Algorand indexer client
#[derive(Debug, Clone)]
pub struct IndexerClient {
    rest: RestClient,
}

impl IndexerClient {
    pub fn new() -> LedgerResult<Self> {
        Self::with_config(IndexerConfig::default())
    }

    pub fn with_config(config: IndexerConfig) -> LedgerResult<Self> {
        let rest = RestClient::new(&config.base_url, TOKEN_HEADER, &config.token, config.timeout)?;
        Ok(Self { rest })
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }
}

#[async_trait]
impl IndexerPort for IndexerClient {
    async fn health(&self) -> LedgerResult<IndexerHealth> {
        self.rest.get_json("/health", &[]).await
    }

    async fn lookup_account(&self, address: &str) -> LedgerResult<IndexerAccountResponse> {
        self.rest
            .get_json(&format!("/v2/accounts/{}", address), &[])
            .await
    }

    async fn lookup_application(&self, app_id: u64) -> LedgerResult<IndexerApplicationResponse> {
        self.rest
            .get_json(&format!("/v2/applications/{}", app_id), &[])
            .await
    }
}
