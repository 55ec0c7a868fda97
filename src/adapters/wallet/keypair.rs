use std::fmt;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::domain::{Address, SignedTransaction};
use crate::ports::models::{LedgerError, LedgerResult};
use crate::ports::{SignedGroup, SignerTransaction, TransactionGroup, WalletPort};

const SEED_LENGTH: usize = 32;
const KEYPAIR_LENGTH: usize = 64;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Failed to load keypair from file: {0}")]
    LoadError(String),
    #[error("Invalid keypair bytes: {0}")]
    InvalidKeypair(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Signs with an ed25519 key held in process.
///
/// Key files are JSON arrays of bytes: either the 32-byte seed or the 64-byte
/// seed followed by the public key.
#[derive(Clone)]
pub struct LocalWallet {
    key: SigningKey,
    address: Address,
}

impl LocalWallet {
    /// Load keypair from a file path (JSON array format)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| WalletError::LoadError(format!("Failed to read file: {}", e)))?;

        let bytes: Vec<u8> = serde_json::from_str(&contents)
            .map_err(|e| WalletError::LoadError(format!("Invalid JSON format: {}", e)))?;

        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WalletError> {
        let key = match bytes.len() {
            SEED_LENGTH => {
                let mut seed = [0u8; SEED_LENGTH];
                seed.copy_from_slice(bytes);
                SigningKey::from_bytes(&seed)
            }
            KEYPAIR_LENGTH => {
                let mut pair = [0u8; KEYPAIR_LENGTH];
                pair.copy_from_slice(bytes);
                SigningKey::from_keypair_bytes(&pair)
                    .map_err(|e| WalletError::InvalidKeypair(e.to_string()))?
            }
            n => {
                return Err(WalletError::InvalidKeypair(format!(
                    "expected {} or {} bytes, got {}",
                    SEED_LENGTH, KEYPAIR_LENGTH, n
                )))
            }
        };

        Ok(Self::from_signing_key(key))
    }

    /// Create a new random keypair
    pub fn new_random() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    fn from_signing_key(key: SigningKey) -> Self {
        let address = Address::new(key.verifying_key().to_bytes());
        Self { key, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Seed followed by public key
    pub fn to_bytes(&self) -> Vec<u8> {
        self.key.to_keypair_bytes().to_vec()
    }

    /// Save keypair to file (JSON array format)
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let json = serde_json::to_string(&self.to_bytes())
            .map_err(|e| WalletError::LoadError(format!("Failed to serialize: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path.as_ref(), json)?;
        Ok(())
    }

    fn sign_one(&self, stx: &SignerTransaction) -> LedgerResult<Option<Vec<u8>>> {
        match &stx.signers {
            Some(signers) if signers.is_empty() => return Ok(None),
            Some(signers) if !signers.contains(&self.address) => {
                return Err(LedgerError::Signing(format!(
                    "wallet {} is not among the requested signers",
                    self.address
                )));
            }
            None if stx.txn.sender != self.address => {
                return Err(LedgerError::Signing(format!(
                    "wallet {} cannot sign for sender {}",
                    self.address, stx.txn.sender
                )));
            }
            _ => {}
        }

        let message = stx.txn.bytes_to_sign()?;
        let signature = self.key.sign(&message);

        let signed = SignedTransaction {
            signature: signature.to_bytes(),
            transaction: stx.txn.clone(),
        };
        Ok(Some(signed.encode()?))
    }
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletPort for LocalWallet {
    async fn sign_transactions(
        &self,
        groups: Vec<TransactionGroup>,
    ) -> LedgerResult<Vec<SignedGroup>> {
        let mut signed_groups = Vec::with_capacity(groups.len());

        for group in &groups {
            let mut signed = SignedGroup::with_capacity(group.len());
            for stx in group {
                if let Some(bytes) = self.sign_one(stx)? {
                    signed.push(bytes);
                }
            }
            signed_groups.push(signed);
        }

        tracing::debug!(
            "Signed {} transaction(s) in {} group(s) as {}",
            signed_groups.iter().map(Vec::len).sum::<usize>(),
            signed_groups.len(),
            self.address
        );
        Ok(signed_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppCallTransaction, SuggestedParams};
    use ed25519_dalek::{Signature, Verifier, VerifyingKey};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn app_call(sender: Address) -> AppCallTransaction {
        let params = SuggestedParams {
            fee: 0,
            min_fee: 1000,
            flat_fee: false,
            first_valid: 1,
            last_valid: 1001,
            genesis_id: "testnet-v1.0".into(),
            genesis_hash: [4u8; 32],
        };
        AppCallTransaction::no_op(&sender.to_string(), &params, 99, vec![b"ping".to_vec()]).unwrap()
    }

    #[test]
    fn test_from_seed_and_keypair_bytes_agree() {
        let wallet = LocalWallet::new_random();
        let bytes = wallet.to_bytes();
        assert_eq!(bytes.len(), 64);

        let from_pair = LocalWallet::from_bytes(&bytes).unwrap();
        let from_seed = LocalWallet::from_bytes(&bytes[..32]).unwrap();
        assert_eq!(from_pair.address(), wallet.address());
        assert_eq!(from_seed.address(), wallet.address());
    }

    #[test]
    fn test_invalid_bytes() {
        let result = LocalWallet::from_bytes(&[0u8; 10]);
        assert!(matches!(result, Err(WalletError::InvalidKeypair(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys").join("wallet.json");

        let wallet = LocalWallet::new_random();
        wallet.save_to_file(&path).unwrap();

        let loaded = LocalWallet::from_file(&path).unwrap();
        assert_eq!(loaded.address(), wallet.address());
    }

    #[test]
    fn test_invalid_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"not valid json").unwrap();
        temp_file.flush().unwrap();

        let result = LocalWallet::from_file(temp_file.path());
        assert!(matches!(result, Err(WalletError::LoadError(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = LocalWallet::new_random();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains(&wallet.address().to_string()));
        assert!(!debug.contains("key"));
    }

    #[tokio::test]
    async fn test_signature_verifies() {
        let wallet = LocalWallet::new_random();
        let txn = app_call(wallet.address());

        let signed = wallet
            .sign_transactions(vec![vec![SignerTransaction::new(txn.clone())]])
            .await
            .unwrap();
        assert_eq!(signed.len(), 1);
        assert_eq!(signed[0].len(), 1);

        let bytes = &signed[0][0];
        // {sig: bin64, txn: ...}
        assert_eq!(&bytes[..7], &[0x82, 0xa3, b's', b'i', b'g', 0xc4, 64]);
        let sig_bytes: [u8; 64] = bytes[7..71].try_into().unwrap();
        assert_eq!(&bytes[75..], txn.encode().unwrap().as_slice());

        let verifying = VerifyingKey::from_bytes(wallet.address().as_bytes()).unwrap();
        verifying
            .verify(&txn.bytes_to_sign().unwrap(), &Signature::from_bytes(&sig_bytes))
            .unwrap();
    }

    #[tokio::test]
    async fn test_refuses_foreign_sender() {
        let wallet = LocalWallet::new_random();
        let other = LocalWallet::new_random();
        let txn = app_call(other.address());

        let err = wallet
            .sign_transactions(vec![vec![SignerTransaction::new(txn)]])
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Signing(_)));
    }

    #[tokio::test]
    async fn test_explicit_signers() {
        let wallet = LocalWallet::new_random();
        let other = LocalWallet::new_random();

        let skipped = SignerTransaction {
            txn: app_call(other.address()),
            signers: Some(vec![]),
        };
        let delegated = SignerTransaction {
            txn: app_call(other.address()),
            signers: Some(vec![wallet.address()]),
        };

        let signed = wallet
            .sign_transactions(vec![vec![skipped, delegated]])
            .await
            .unwrap();
        assert_eq!(signed[0].len(), 1);
    }
}
