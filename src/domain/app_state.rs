//! Application State Decoding
//!
//! Nodes report key/value state as `{key: base64, value: {type, bytes?, uint?}}`.
//! Type 1 holds bytes, type 2 holds an unsigned integer.

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::encoding::EncodingError;

pub const TYPE_BYTES: u64 = 1;
pub const TYPE_UINT: u64 = 2;

/// One raw state entry as returned by the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealKeyValue {
    pub key: String,
    pub value: TealValue,
}

/// Tagged state value; the node omits `bytes` and `uint` when they are empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TealValue {
    #[serde(rename = "type")]
    pub value_type: u64,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

/// Decoded state value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
    Bytes(String),
    Uint(u64),
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bytes(s) => write!(f, "{}", s),
            StateValue::Uint(n) => write!(f, "{}", n),
        }
    }
}

/// Decoded state, keyed by UTF-8 key
pub type ApplicationState = BTreeMap<String, Option<StateValue>>;

/// Decode raw state entries.
///
/// Entries with an unrecognized type tag are kept with a `None` value rather
/// than rejected. Later entries with the same decoded key replace earlier ones.
pub fn parse_application_state(state: &[TealKeyValue]) -> Result<ApplicationState, EncodingError> {
    let mut parsed = ApplicationState::new();

    for item in state {
        let key = decode_text(&item.key)?;
        let value = match item.value.value_type {
            TYPE_BYTES => Some(StateValue::Bytes(decode_text(&item.value.bytes)?)),
            TYPE_UINT => Some(StateValue::Uint(item.value.uint)),
            _ => None,
        };
        parsed.insert(key, value);
    }

    Ok(parsed)
}

fn decode_text(encoded: &str) -> Result<String, EncodingError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
