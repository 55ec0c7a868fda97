//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, these traits abstract:
//! - The Algorand node (algod REST API)
//! - The indexer (query API)
//! - The wallet that signs transactions

pub mod models;
pub mod node;
pub mod indexer;
pub mod wallet;
pub mod mocks;

pub use models::{LedgerError, LedgerResult};
pub use node::NodePort;
pub use indexer::IndexerPort;
pub use wallet::{SignedGroup, SignerTransaction, TransactionGroup, WalletPort};
