//! Domain Layer - Algorand data formats and pure helpers
//!
//! Nothing here performs I/O. Network access goes through the ports layer.
//!
//! - `address`: account address text form and checksum
//! - `transaction`: NoOp app-call construction, canonical encoding, tx ids
//! - `encoding`: argument encoding and microAlgo formatting
//! - `app_state`: key/value application state decoding
//! - `contracts`: symbolic contract names and their deployed app ids

pub mod address;
pub mod transaction;
pub mod encoding;
pub mod app_state;
pub mod contracts;

pub use address::{Address, AddressError};
pub use transaction::{AppCallTransaction, SignedTransaction, SuggestedParams, TransactionError};
pub use encoding::{
    encode_number, encode_string, format_algo_amount, parse_algo_amount, AppArg, EncodingError,
};
pub use app_state::{parse_application_state, ApplicationState, StateValue, TealKeyValue, TealValue};
pub use contracts::{ContractError, ContractKind, ContractRegistry};
