//! Indexer Adapter
//!
//! Implementation of the IndexerPort against the Algorand indexer REST API.

mod client;

pub use client::{IndexerClient, IndexerConfig, TESTNET_INDEXER_URL};
