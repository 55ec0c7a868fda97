//! AlgoHealX Ledger - Algorand access library
//!
//! Client construction, app-call submission with confirmation polling,
//! and state queries for the AlgoHealX supply-chain contracts.
//!
//! # Modules
//!
//! - `domain`: Addresses, app-call encoding, argument and amount helpers, state decoding
//! - `ports`: Trait abstractions (NodePort, IndexerPort, WalletPort)
//! - `adapters`: External implementations (algod, indexer, local wallet, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Confirmation polling, app calls and queries

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
