//! Ledger Integration Tests
//!
//! Verifies the ledger components work together end to end:
//! 1. LocalWallet key file -> create_app_call_txn -> signed bytes on the wire
//! 2. Confirmation polling timeouts and pool rejections
//! 3. Config-resolved contract names -> global state decoding
//!
//! All tests are deterministic (no real network calls) and use the mock node.

use algohealx_ledger::adapters::LocalWallet;
use algohealx_ledger::application::{
    create_app_call_txn, get_account_info, get_global_state, wait_for_confirmation,
};
use algohealx_ledger::config::load_config;
use algohealx_ledger::domain::{
    encode_number, encode_string, format_algo_amount, AppCallTransaction, StateValue,
    SuggestedParams, TealKeyValue, TealValue,
};
use algohealx_ledger::ports::mocks::MockNode;
use algohealx_ledger::ports::models::{
    Account, Application, ApplicationParams, PendingTransactionInfo,
};
use algohealx_ledger::ports::{LedgerError, NodePort};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

// ============================================================================
// Test Fixtures
// ============================================================================

const SIGNED_PREFIX: [u8; 7] = [0x82, 0xa3, b's', b'i', b'g', 0xc4, 0x40];
const SIGNATURE_RANGE: std::ops::Range<usize> = 7..71;
const TXN_OFFSET: usize = 75;

fn saved_wallet(dir: &TempDir) -> (LocalWallet, std::path::PathBuf) {
    let path = dir.path().join("keys").join("wallet.json");
    let wallet = LocalWallet::new_random();
    wallet.save_to_file(&path).unwrap();
    (wallet, path)
}

fn register_args() -> Vec<Vec<u8>> {
    vec![
        encode_string("register_batch"),
        encode_string("PARA-500MG-B7"),
        encode_number(2_400u64).unwrap(),
    ]
}

// ============================================================================
// App call lifecycle
// ============================================================================

#[tokio::test]
async fn test_app_call_from_key_file() {
    let dir = TempDir::new().unwrap();
    let (original, path) = saved_wallet(&dir);
    let wallet = LocalWallet::from_file(&path).unwrap();
    assert_eq!(wallet.address(), original.address());

    let node = MockNode::new(31_000_000)
        .with_submit_tx_id("REGISTERTX")
        .with_pending(PendingTransactionInfo::default())
        .with_confirmation(31_000_001);
    let sender = wallet.address().to_string();
    // Params as the node suggests them before polling advances the round
    let suggested = SuggestedParams::try_from(&node.transaction_params().await.unwrap()).unwrap();

    let tx_id = create_app_call_txn(&node, &sender, 1001, register_args(), &wallet)
        .await
        .unwrap();

    assert_eq!(tx_id, "REGISTERTX");
    assert_eq!(node.pending_calls(), vec!["REGISTERTX", "REGISTERTX"]);
    assert_eq!(node.round_waits(), vec![31_000_001]);

    let submitted = node.submitted();
    assert_eq!(submitted.len(), 1);
    let raw = &submitted[0];
    assert_eq!(&raw[..SIGNED_PREFIX.len()], &SIGNED_PREFIX);

    // The wire transaction is exactly what the suggested params produce
    let expected = AppCallTransaction::no_op(&sender, &suggested, 1001, register_args()).unwrap();
    assert_eq!(expected.first_valid, 31_000_000);
    assert_eq!(expected.last_valid, 31_001_000);
    assert_eq!(&raw[TXN_OFFSET..], expected.encode().unwrap().as_slice());
    assert!(expected.fee >= 1000);

    // And the signature verifies against the sender's key
    let key = VerifyingKey::from_bytes(wallet.address().as_bytes()).unwrap();
    let sig_bytes: [u8; 64] = raw[SIGNATURE_RANGE].try_into().unwrap();
    let signature = Signature::from_bytes(&sig_bytes);
    assert!(key.verify(&expected.bytes_to_sign().unwrap(), &signature).is_ok());
}

#[tokio::test]
async fn test_app_call_times_out_after_submission() {
    let wallet = LocalWallet::new_random();
    let node = MockNode::new(200);
    let sender = wallet.address().to_string();

    let err = create_app_call_txn(&node, &sender, 7, vec![], &wallet)
        .await
        .unwrap_err();

    assert_eq!(err, LedgerError::ConfirmationTimeout { rounds: 4 });
    // Submission already happened and cannot be undone
    assert_eq!(node.submitted().len(), 1);
    assert_eq!(node.round_waits(), vec![201, 202, 203, 204]);
}

#[tokio::test]
async fn test_app_call_for_foreign_sender_is_not_submitted() {
    let wallet = LocalWallet::new_random();
    let other = LocalWallet::new_random();
    let node = MockNode::new(5).with_confirmation(5);

    let err = create_app_call_txn(&node, &other.address().to_string(), 7, vec![], &wallet)
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Signing(_)));
    assert!(node.submitted().is_empty());
}

#[tokio::test]
async fn test_rejected_submission_skips_polling() {
    let wallet = LocalWallet::new_random();
    let node = MockNode::new(5)
        .with_submit_error(LedgerError::Submission("API error 400: overspend".into()));

    let err = create_app_call_txn(&node, &wallet.address().to_string(), 7, vec![], &wallet)
        .await
        .unwrap_err();

    assert!(matches!(err, LedgerError::Submission(ref msg) if msg.contains("overspend")));
    assert!(node.pending_calls().is_empty());
}

// ============================================================================
// Confirmation polling
// ============================================================================

#[tokio::test]
async fn test_wait_with_custom_timeout() {
    let node = MockNode::new(1_000);

    let err = wait_for_confirmation(&node, "SLOWTX", Some(2)).await.unwrap_err();

    assert_eq!(err, LedgerError::ConfirmationTimeout { rounds: 2 });
    assert_eq!(node.pending_calls().len(), 2);
    assert_eq!(node.round_waits(), vec![1_001, 1_002]);
}

#[test]
fn test_pool_error_fails_fast() {
    let node = MockNode::new(40).with_pending(PendingTransactionInfo {
        pool_error: "TransactionPool.Remember: txn dead".into(),
        ..Default::default()
    });

    let err = tokio_test::block_on(wait_for_confirmation(&node, "DEADTX", Some(10))).unwrap_err();

    assert!(matches!(err, LedgerError::Submission(ref msg) if msg.contains("txn dead")));
    assert!(node.round_waits().is_empty());
}

// ============================================================================
// Queries with config-resolved contracts
// ============================================================================

#[tokio::test]
async fn test_contract_name_to_global_state() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"[contracts]\nsupply_chain_tracker = 4242\n").unwrap();
    let config = load_config(file.path()).unwrap();

    let app_id = config.resolve_app("supply-chain-tracker").unwrap();
    assert_eq!(app_id, 4242);
    assert!(config.resolve_app("REGULATOR_APPROVAL").is_err());

    let node = MockNode::new(1).with_application(Application {
        id: 4242,
        params: ApplicationParams {
            global_state: vec![
                TealKeyValue {
                    key: "c3RhZ2U=".into(),
                    value: TealValue { value_type: 1, bytes: "ZGlzdHJpYnV0b3I=".into(), uint: 0 },
                },
                TealKeyValue {
                    key: "aG9wcw==".into(),
                    value: TealValue { value_type: 2, bytes: String::new(), uint: 3 },
                },
                TealKeyValue {
                    key: "b2Rk".into(),
                    value: TealValue { value_type: 9, bytes: String::new(), uint: 0 },
                },
            ],
            ..Default::default()
        },
        extra: Default::default(),
    });

    let state = get_global_state(&node, app_id).await.unwrap();
    assert_eq!(state.len(), 3);
    assert_eq!(state["stage"], Some(StateValue::Bytes("distributor".into())));
    assert_eq!(state["hops"], Some(StateValue::Uint(3)));
    assert_eq!(state["odd"], None);
}

#[test]
fn test_shipped_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/testnet.toml");
    let config = load_config(path).unwrap();
    assert_eq!(config.confirmation.timeout_rounds, 4);
    assert!(config.resolve_app("MEDICINE_REGISTRY").is_err());
}

#[tokio::test]
async fn test_account_balance_display() {
    let wallet = LocalWallet::new_random();
    let account = Account {
        address: wallet.address(),
        amount: 10_250_000,
        min_balance: 100_000,
        round: 9,
        status: "Offline".into(),
        apps_local_state: vec![],
        created_apps: vec![],
        extra: Default::default(),
    };
    let node = MockNode::new(9).with_account(account);

    let fetched = get_account_info(&node, &wallet.address().to_string()).await.unwrap();
    assert_eq!(format_algo_amount(fetched.amount as i64), "10.250000");
    assert_eq!(format_algo_amount(fetched.min_balance as i64), "0.100000");
}
