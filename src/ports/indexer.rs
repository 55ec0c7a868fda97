//! Indexer Port - historical and query lookups

use async_trait::async_trait;

use super::models::{
    IndexerAccountResponse, IndexerApplicationResponse, IndexerHealth, LedgerResult,
};

#[async_trait]
pub trait IndexerPort: Send + Sync {
    async fn health(&self) -> LedgerResult<IndexerHealth>;

    async fn lookup_account(&self, address: &str) -> LedgerResult<IndexerAccountResponse>;

    async fn lookup_application(&self, app_id: u64) -> LedgerResult<IndexerApplicationResponse>;
}
