//! Algod API Client
//!
//! HTTP client for the Algorand node REST API (v2).

use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::http::RestClient;
use crate::ports::models::{
    Account, Application, LedgerError, LedgerResult, NodeStatus, PendingTransactionInfo,
    SubmitResponse, TransactionParams,
};
use crate::ports::NodePort;

/// Public TestNet node
pub const TESTNET_ALGOD_URL: &str = "https://testnet-api.algonode.cloud";

const TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Algod client configuration
#[derive(Debug, Clone)]
pub struct AlgodConfig {
    pub base_url: String,
    /// API token; left out of requests when empty
    pub token: String,
    pub timeout: Duration,
}

impl Default for AlgodConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_ALGOD_URL.to_string(),
            token: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Algorand node client
#[derive(Debug, Clone)]
pub struct AlgodClient {
    rest: RestClient,
}

impl AlgodClient {
    /// Create a client for the public TestNet node
    pub fn new() -> LedgerResult<Self> {
        Self::with_config(AlgodConfig::default())
    }

    pub fn with_config(config: AlgodConfig) -> LedgerResult<Self> {
        let rest = RestClient::new(&config.base_url, TOKEN_HEADER, &config.token, config.timeout)?;
        Ok(Self { rest })
    }

    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }
}

#[async_trait]
impl NodePort for AlgodClient {
    async fn status(&self) -> LedgerResult<NodeStatus> {
        self.rest.get_json("/v2/status", &[]).await
    }

    async fn status_after_block(&self, round: u64) -> LedgerResult<NodeStatus> {
        self.rest
            .get_json(&format!("/v2/status/wait-for-block-after/{}", round), &[])
            .await
    }

    async fn pending_transaction_information(
        &self,
        tx_id: &str,
    ) -> LedgerResult<PendingTransactionInfo> {
        self.rest
            .get_json(
                &format!("/v2/transactions/pending/{}", tx_id),
                &[("format", "json")],
            )
            .await
    }

    async fn transaction_params(&self) -> LedgerResult<TransactionParams> {
        self.rest.get_json("/v2/transactions/params", &[]).await
    }

    async fn send_raw_transaction(&self, signed: Vec<u8>) -> LedgerResult<SubmitResponse> {
        self.rest
            .post_bytes("/v2/transactions", signed, LedgerError::Submission)
            .await
    }

    async fn account_information(&self, address: &str) -> LedgerResult<Account> {
        self.rest
            .get_json(&format!("/v2/accounts/{}", address), &[("format", "json")])
            .await
    }

    async fn application_by_id(&self, app_id: u64) -> LedgerResult<Application> {
        self.rest
            .get_json(&format!("/v2/applications/{}", app_id), &[])
            .await
    }
}
