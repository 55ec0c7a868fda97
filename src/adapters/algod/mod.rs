//! Algod Adapter
//!
//! Implementation of the NodePort against the algod REST API.

mod client;

pub use client::{AlgodClient, AlgodConfig, TESTNET_ALGOD_URL};
