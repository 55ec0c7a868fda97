//! Application Layer - ledger use cases
//!
//! Composes the ports into the operations callers use: confirmation
//! polling, app-call submission and state queries.

pub mod confirmation;
pub mod app_call;
pub mod queries;

pub use confirmation::{wait_for_confirmation, DEFAULT_CONFIRMATION_ROUNDS};
pub use app_call::create_app_call_txn;
pub use queries::{get_account_info, get_application_state, get_global_state};
