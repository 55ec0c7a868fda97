//! Error taxonomy and wire models shared by all ports

use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    transaction::{DEFAULT_VALIDITY_WINDOW, GENESIS_HASH_LENGTH},
    Address, AddressError, EncodingError, SuggestedParams, TealKeyValue, TransactionError,
};

/// Common result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors surfaced by the ledger facade. Nothing is recovered locally except
/// the round-advance loop in the confirmation poller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transaction not confirmed after {rounds} rounds")]
    ConfirmationTimeout { rounds: u64 },
    #[error("Network request failed: {0}")]
    Network(String),
    #[error("Transaction construction failed: {0}")]
    TransactionConstruction(String),
    #[error("Transaction submission failed: {0}")]
    Submission(String),
    #[error("Encoding failed: {0}")]
    Encoding(String),
    #[error("Wallet signing failed: {0}")]
    Signing(String),
}

impl From<TransactionError> for LedgerError {
    fn from(err: TransactionError) -> Self {
        LedgerError::TransactionConstruction(err.to_string())
    }
}

impl From<AddressError> for LedgerError {
    fn from(err: AddressError) -> Self {
        LedgerError::TransactionConstruction(err.to_string())
    }
}

impl From<EncodingError> for LedgerError {
    fn from(err: EncodingError) -> Self {
        LedgerError::Encoding(err.to_string())
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LedgerError::Network(format!("request timed out: {}", err))
        } else {
            LedgerError::Network(err.to_string())
        }
    }
}

/// Error body returned by algod and the indexer on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// `GET /v2/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    pub last_round: u64,
    #[serde(default)]
    pub last_version: String,
    #[serde(default)]
    pub time_since_last_round: u64,
    #[serde(default)]
    pub catchup_time: u64,
}

/// `GET /v2/transactions/params`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionParams {
    #[serde(default)]
    pub consensus_version: String,
    pub fee: u64,
    pub genesis_hash: String,
    pub genesis_id: String,
    pub last_round: u64,
    pub min_fee: u64,
}

impl TryFrom<&TransactionParams> for SuggestedParams {
    type Error = LedgerError;

    fn try_from(params: &TransactionParams) -> Result<Self, Self::Error> {
        let hash = base64::engine::general_purpose::STANDARD
            .decode(&params.genesis_hash)
            .map_err(|e| {
                TransactionError::InvalidGenesisHash(format!("{}: {}", params.genesis_hash, e))
            })?;

        let genesis_hash: [u8; GENESIS_HASH_LENGTH] = hash.as_slice().try_into().map_err(|_| {
            TransactionError::InvalidGenesisHash(format!(
                "expected {} bytes, got {}",
                GENESIS_HASH_LENGTH,
                hash.len()
            ))
        })?;

        Ok(SuggestedParams {
            fee: params.fee,
            min_fee: params.min_fee,
            flat_fee: false,
            first_valid: params.last_round,
            last_valid: params.last_round.saturating_add(DEFAULT_VALIDITY_WINDOW),
            genesis_id: params.genesis_id.clone(),
            genesis_hash,
        })
    }
}

/// `POST /v2/transactions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(rename = "txId")]
    pub tx_id: String,
}

/// `GET /v2/transactions/pending/{txid}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransactionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_round: Option<u64>,
    #[serde(default)]
    pub pool_error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<String>>,
    #[serde(default)]
    pub txn: serde_json::Value,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PendingTransactionInfo {
    /// Confirmed round, if the transaction has made it into a block
    pub fn confirmed(&self) -> Option<u64> {
        self.confirmed_round.filter(|round| *round > 0)
    }
}

/// Global or local state schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StateSchema {
    #[serde(default)]
    pub num_uint: u64,
    #[serde(default)]
    pub num_byte_slice: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Address>,
    #[serde(default)]
    pub global_state: Vec<TealKeyValue>,
    #[serde(default)]
    pub global_state_schema: StateSchema,
    #[serde(default)]
    pub local_state_schema: StateSchema,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET /v2/applications/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    #[serde(default)]
    pub params: ApplicationParams,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApplicationLocalState {
    pub id: u64,
    #[serde(default)]
    pub key_value: Vec<TealKeyValue>,
    #[serde(default)]
    pub schema: StateSchema,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// `GET /v2/accounts/{address}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Account {
    pub address: Address,
    pub amount: u64,
    #[serde(default)]
    pub min_balance: u64,
    #[serde(default)]
    pub round: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub apps_local_state: Vec<ApplicationLocalState>,
    #[serde(default)]
    pub created_apps: Vec<Application>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Indexer `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerHealth {
    pub round: u64,
    #[serde(default)]
    pub db_available: bool,
    #[serde(default)]
    pub is_migrating: bool,
    #[serde(default)]
    pub version: String,
}

/// Indexer `GET /v2/accounts/{address}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerAccountResponse {
    pub account: Account,
    pub current_round: u64,
}

/// Indexer `GET /v2/applications/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerApplicationResponse {
    pub application: Application,
    pub current_round: u64,
}
