//! Argument Encoding and Amount Formatting
//!
//! Helpers that turn user values into application-call argument bytes, and
//! convert between microAlgos and their decimal Algo representation.

use std::fmt::Display;
use std::str::FromStr;

use base64::Engine;
use rust_decimal::Decimal;
use thiserror::Error;

/// MicroAlgos per Algo
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;
/// Decimal places in an Algo amount
pub const ALGO_DECIMALS: u32 = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("Value does not fit in uint64: {0}")]
    OutOfRange(String),
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid app argument '{0}': expected str:<text>, int:<n> or b64:<data>")]
    InvalidAppArg(String),
}

/// UTF-8 bytes of `s`
pub fn encode_string(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// 8-byte big-endian encoding of `num` as a uint64
pub fn encode_number<N>(num: N) -> Result<Vec<u8>, EncodingError>
where
    N: TryInto<u64> + Display + Copy,
{
    let value: u64 = num
        .try_into()
        .map_err(|_| EncodingError::OutOfRange(num.to_string()))?;
    Ok(value.to_be_bytes().to_vec())
}

/// Format microAlgos as Algos with exactly six decimal places
pub fn format_algo_amount(micro_algos: i64) -> String {
    format!("{:.6}", Decimal::new(micro_algos, ALGO_DECIMALS))
}

/// Parse a decimal Algo amount (e.g. `"1.5"`) into microAlgos
pub fn parse_algo_amount(algos: &str) -> Result<u64, EncodingError> {
    let amount = Decimal::from_str(algos.trim())
        .map_err(|e| EncodingError::InvalidAmount(format!("{}: {}", algos, e)))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EncodingError::InvalidAmount(format!("{} is negative", algos)));
    }
    if amount.scale() > ALGO_DECIMALS && amount.normalize().scale() > ALGO_DECIMALS {
        return Err(EncodingError::InvalidAmount(format!(
            "{} has more than {} decimal places",
            algos, ALGO_DECIMALS
        )));
    }

    let micro = amount * Decimal::from(MICROALGOS_PER_ALGO);
    u64::try_from(micro.normalize())
        .map_err(|_| EncodingError::OutOfRange(algos.to_string()))
}

/// A typed application argument as written on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppArg {
    Str(String),
    Int(u64),
    Bytes(Vec<u8>),
}

impl AppArg {
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        match self {
            AppArg::Str(s) => Ok(encode_string(s)),
            AppArg::Int(n) => encode_number(*n),
            AppArg::Bytes(b) => Ok(b.clone()),
        }
    }
}

impl FromStr for AppArg {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| EncodingError::InvalidAppArg(s.to_string()))?;

        match kind {
            "str" => Ok(AppArg::Str(value.to_string())),
            "int" => value
                .parse::<u64>()
                .map(AppArg::Int)
                .map_err(|_| EncodingError::OutOfRange(value.to_string())),
            "b64" => base64::engine::general_purpose::STANDARD
                .decode(value)
                .map(AppArg::Bytes)
                .map_err(|e| EncodingError::InvalidBase64(e.to_string())),
            _ => Err(EncodingError::InvalidAppArg(s.to_string())),
        }
    }
}
