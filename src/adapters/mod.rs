//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Algod: node REST client
//! - Indexer: query REST client
//! - Wallet: local ed25519 signer
//! - CLI: Command-line interface definitions

mod http;

pub mod algod;
pub mod indexer;
pub mod wallet;
pub mod cli;

pub use algod::AlgodClient;
pub use indexer::IndexerClient;
pub use wallet::LocalWallet;
pub use cli::CliApp;
