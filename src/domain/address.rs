//! Algorand Addresses
//!
//! An address is a 32-byte ed25519 public key. Its text form is the base32
//! (RFC 4648, no padding) encoding of the key followed by a 4-byte checksum,
//! the last four bytes of `sha512/256(key)`.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use thiserror::Error;

pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const CHECKSUM_LENGTH: usize = 4;
pub const ADDRESS_LENGTH: usize = 58;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address must be {ADDRESS_LENGTH} characters, got {0}")]
    InvalidLength(usize),
    #[error("Address is not valid base32: {0}")]
    InvalidEncoding(String),
    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}

/// Algorand account address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; PUBLIC_KEY_LENGTH]);

impl Address {
    pub const fn new(public_key: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(public_key)
    }

    /// The all-zero address, used by the protocol as "no account"
    pub const fn zero() -> Self {
        Self([0u8; PUBLIC_KEY_LENGTH])
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LENGTH]
    }

    fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LENGTH] {
        let digest = Sha512_256::digest(public_key);
        let mut checksum = [0u8; CHECKSUM_LENGTH];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LENGTH..]);
        checksum
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength(s.len()));
        }

        let decoded = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

        if decoded.len() != PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH {
            return Err(AddressError::InvalidEncoding(format!(
                "decoded to {} bytes",
                decoded.len()
            )));
        }

        let (key, checksum) = decoded.split_at(PUBLIC_KEY_LENGTH);
        if Self::checksum(key) != checksum {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
        public_key.copy_from_slice(key);
        Ok(Self(public_key))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_LENGTH + CHECKSUM_LENGTH);
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&Self::checksum(&self.0));
        f.write_str(&BASE32_NOPAD.encode(&bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const ZERO_ADDRESS: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ";

    #[test]
    fn test_zero_address_text_form() {
        assert_eq!(Address::zero().to_string(), ZERO_ADDRESS);

        let parsed: Address = ZERO_ADDRESS.parse().unwrap();
        assert!(parsed.is_zero());
    }

    #[test]
    fn test_address_shape() {
        let addr = Address::new([7u8; 32]).to_string();
        let re = Regex::new(r"^[A-Z2-7]{58}$").unwrap();
        assert!(re.is_match(&addr), "unexpected address shape: {}", addr);

        let back: Address = addr.parse().unwrap();
        assert_eq!(back.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn test_wrong_length() {
        let err = "ABC".parse::<Address>().unwrap_err();
        assert_eq!(err, AddressError::InvalidLength(3));
    }

    #[test]
    fn test_checksum_mismatch() {
        // Flip one character inside the public key part
        let mut tampered = ZERO_ADDRESS.to_string();
        tampered.replace_range(0..1, "B");
        let err = tampered.parse::<Address>().unwrap_err();
        assert_eq!(err, AddressError::ChecksumMismatch);
    }

    #[test]
    fn test_invalid_characters() {
        let bad = "1".repeat(ADDRESS_LENGTH);
        assert!(matches!(
            bad.parse::<Address>(),
            Err(AddressError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Address::zero()).unwrap();
        assert_eq!(json, format!("\"{}\"", ZERO_ADDRESS));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Address::zero());
    }
}
