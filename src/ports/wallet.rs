//! Wallet Port - external transaction signing
//!
//! Mirrors the wallet-connect request shape: a list of atomic groups, each a
//! list of `{txn, signers?}` entries. The wallet answers with signed bytes in
//! the same group layout. Signing may wait on user interaction, so callers
//! should not expect it to return promptly.

use async_trait::async_trait;

use crate::domain::{Address, AppCallTransaction};
use super::models::LedgerResult;

/// A transaction offered to the wallet for signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerTransaction {
    pub txn: AppCallTransaction,
    /// Accounts expected to sign. `None` means the sender; an empty list asks
    /// the wallet to leave this transaction unsigned.
    pub signers: Option<Vec<Address>>,
}

impl SignerTransaction {
    pub fn new(txn: AppCallTransaction) -> Self {
        Self { txn, signers: None }
    }
}

pub type TransactionGroup = Vec<SignerTransaction>;

/// Encoded signed transactions of one group
pub type SignedGroup = Vec<Vec<u8>>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletPort: Send + Sync {
    async fn sign_transactions(&self, groups: Vec<TransactionGroup>)
        -> LedgerResult<Vec<SignedGroup>>;
}
