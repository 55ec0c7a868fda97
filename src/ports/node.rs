//! Node Port - algod REST operations used by the facade

use async_trait::async_trait;

use super::models::{
    Account, Application, LedgerResult, NodeStatus, PendingTransactionInfo, SubmitResponse,
    TransactionParams,
};

/// Operations against an Algorand node. Every failure of the underlying
/// request surfaces as `LedgerError::Network`, except a rejected raw
/// submission which is `LedgerError::Submission`.
#[async_trait]
pub trait NodePort: Send + Sync {
    /// Current node status, including the last committed round
    async fn status(&self) -> LedgerResult<NodeStatus>;

    /// Block until the node has seen a round after `round`
    async fn status_after_block(&self, round: u64) -> LedgerResult<NodeStatus>;

    async fn pending_transaction_information(&self, tx_id: &str)
        -> LedgerResult<PendingTransactionInfo>;

    /// Suggested fee and validity parameters for new transactions
    async fn transaction_params(&self) -> LedgerResult<TransactionParams>;

    /// Submit one or more concatenated signed transactions
    async fn send_raw_transaction(&self, signed: Vec<u8>) -> LedgerResult<SubmitResponse>;

    async fn account_information(&self, address: &str) -> LedgerResult<Account>;

    async fn application_by_id(&self, app_id: u64) -> LedgerResult<Application>;
}
