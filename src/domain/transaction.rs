//! Application Call Transactions
//!
//! Builds NoOp application-call transactions and their canonical msgpack
//! form. Canonical here means: map keys in lexical order, zero and empty
//! fields omitted, integers in their smallest encoding. Transaction ids and
//! signatures are both computed over `"TX" || canonical bytes`, so any
//! deviation from this layout produces a transaction the network rejects.

use data_encoding::BASE32_NOPAD;
use rmp::encode;
use sha2::{Digest, Sha512_256};
use thiserror::Error;

use super::address::{Address, AddressError};

/// Maximum number of application arguments per call
pub const MAX_APP_ARGS: usize = 16;
/// Maximum combined size in bytes of all application arguments
pub const MAX_ARGS_SIZE: usize = 2048;
/// Bytes a signature adds to an encoded transaction (`sig` key + bin64)
pub const SIGNATURE_ENCODING_INCR: usize = 75;
/// Rounds a transaction stays valid when the node does not say otherwise
pub const DEFAULT_VALIDITY_WINDOW: u64 = 1000;
pub const SIGNATURE_LENGTH: usize = 64;
pub const GENESIS_HASH_LENGTH: usize = 32;

const TX_DOMAIN_PREFIX: &[u8] = b"TX";
const APP_CALL_TYPE: &str = "appl";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Invalid sender address: {0}")]
    InvalidSender(#[from] AddressError),
    #[error("Too many application arguments: {0} (max {MAX_APP_ARGS})")]
    TooManyArgs(usize),
    #[error("Application arguments total {0} bytes (max {MAX_ARGS_SIZE})")]
    ArgsTooLarge(usize),
    #[error("Invalid genesis hash: {0}")]
    InvalidGenesisHash(String),
    #[error("Msgpack encoding failed: {0}")]
    Encode(String),
}

/// Network parameters a transaction is built against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedParams {
    /// Fee per byte, or the total fee when `flat_fee` is set
    pub fee: u64,
    pub min_fee: u64,
    pub flat_fee: bool,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; GENESIS_HASH_LENGTH],
}

/// A NoOp application call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCallTransaction {
    pub sender: Address,
    pub app_id: u64,
    pub app_args: Vec<Vec<u8>>,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: [u8; GENESIS_HASH_LENGTH],
}

enum Field<'a> {
    Uint(u64),
    Str(&'a str),
    Bin(&'a [u8]),
    BinArray(&'a [Vec<u8>]),
}

impl AppCallTransaction {
    /// Build a NoOp call from `sender` against `app_id` and assign its fee
    pub fn no_op(
        sender: &str,
        params: &SuggestedParams,
        app_id: u64,
        app_args: Vec<Vec<u8>>,
    ) -> Result<Self, TransactionError> {
        let sender: Address = sender.parse()?;

        if app_args.len() > MAX_APP_ARGS {
            return Err(TransactionError::TooManyArgs(app_args.len()));
        }
        let total: usize = app_args.iter().map(Vec::len).sum();
        if total > MAX_ARGS_SIZE {
            return Err(TransactionError::ArgsTooLarge(total));
        }

        let mut txn = Self {
            sender,
            app_id,
            app_args,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.clone(),
            genesis_hash: params.genesis_hash,
        };
        txn.assign_fee(params)?;
        Ok(txn)
    }

    fn assign_fee(&mut self, params: &SuggestedParams) -> Result<(), TransactionError> {
        if params.flat_fee {
            self.fee = params.fee.max(params.min_fee);
            return Ok(());
        }

        // Size is estimated with the per-byte rate in the fee slot
        self.fee = params.fee;
        let size = self.estimate_signed_size()? as u64;
        self.fee = params.fee.saturating_mul(size).max(params.min_fee);
        Ok(())
    }

    /// Encoded size once a single signature is attached
    pub fn estimate_signed_size(&self) -> Result<usize, TransactionError> {
        Ok(self.encode()?.len() + SIGNATURE_ENCODING_INCR)
    }

    fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        let mut fields = Vec::with_capacity(9);

        if !self.app_args.is_empty() {
            fields.push(("apaa", Field::BinArray(&self.app_args)));
        }
        if self.app_id != 0 {
            fields.push(("apid", Field::Uint(self.app_id)));
        }
        if self.fee != 0 {
            fields.push(("fee", Field::Uint(self.fee)));
        }
        if self.first_valid != 0 {
            fields.push(("fv", Field::Uint(self.first_valid)));
        }
        if !self.genesis_id.is_empty() {
            fields.push(("gen", Field::Str(&self.genesis_id)));
        }
        if self.genesis_hash != [0u8; GENESIS_HASH_LENGTH] {
            fields.push(("gh", Field::Bin(&self.genesis_hash)));
        }
        if self.last_valid != 0 {
            fields.push(("lv", Field::Uint(self.last_valid)));
        }
        if !self.sender.is_zero() {
            fields.push(("snd", Field::Bin(self.sender.as_bytes())));
        }
        fields.push(("type", Field::Str(APP_CALL_TYPE)));

        fields
    }

    /// Canonical msgpack encoding
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let mut buf = Vec::with_capacity(128);
        write_map(&mut buf, &self.fields())?;
        Ok(buf)
    }

    /// Bytes a signer must sign: `"TX" || encode()`
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, TransactionError> {
        let encoded = self.encode()?;
        let mut bytes = Vec::with_capacity(TX_DOMAIN_PREFIX.len() + encoded.len());
        bytes.extend_from_slice(TX_DOMAIN_PREFIX);
        bytes.extend_from_slice(&encoded);
        Ok(bytes)
    }

    /// Transaction id (52 base32 characters)
    pub fn id(&self) -> Result<String, TransactionError> {
        let digest = Sha512_256::digest(self.bytes_to_sign()?);
        Ok(BASE32_NOPAD.encode(&digest))
    }
}

/// A transaction with a single ed25519 signature attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub signature: [u8; SIGNATURE_LENGTH],
    pub transaction: AppCallTransaction,
}

impl SignedTransaction {
    /// Encode as `{sig, txn}`, the form accepted by the node's raw submit endpoint
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let txn = self.transaction.encode()?;
        let mut buf = Vec::with_capacity(txn.len() + SIGNATURE_ENCODING_INCR + 4);

        encode::write_map_len(&mut buf, 2).map_err(encode_err)?;
        encode::write_str(&mut buf, "sig").map_err(encode_err)?;
        encode::write_bin(&mut buf, &self.signature).map_err(encode_err)?;
        encode::write_str(&mut buf, "txn").map_err(encode_err)?;
        buf.extend_from_slice(&txn);

        Ok(buf)
    }
}

fn write_map(buf: &mut Vec<u8>, fields: &[(&str, Field<'_>)]) -> Result<(), TransactionError> {
    encode::write_map_len(buf, fields.len() as u32).map_err(encode_err)?;

    for (key, value) in fields {
        encode::write_str(buf, key).map_err(encode_err)?;
        match value {
            Field::Uint(v) => {
                encode::write_uint(buf, *v).map_err(encode_err)?;
            }
            Field::Str(s) => encode::write_str(buf, s).map_err(encode_err)?,
            Field::Bin(b) => encode::write_bin(buf, b).map_err(encode_err)?,
            Field::BinArray(items) => {
                encode::write_array_len(buf, items.len() as u32).map_err(encode_err)?;
                for item in items.iter() {
                    encode::write_bin(buf, item).map_err(encode_err)?;
                }
            }
        }
    }

    Ok(())
}

fn encode_err<E: std::fmt::Display>(e: E) -> TransactionError {
    TransactionError::Encode(e.to_string())
}
