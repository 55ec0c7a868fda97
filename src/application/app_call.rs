//! Application Call Submission
//!
//! Full lifecycle of a NoOp app call: fetch params, build, sign through the
//! wallet, submit, then wait for confirmation.

use crate::domain::{AppCallTransaction, SuggestedParams};
use crate::ports::models::{LedgerError, LedgerResult};
use crate::ports::{NodePort, SignerTransaction, WalletPort};

use super::confirmation::wait_for_confirmation;

/// Build, sign, submit and confirm a NoOp call to `app_id`.
///
/// Returns the transaction id reported by the node. Once the node has
/// accepted the submission the call is irreversible, even if confirmation
/// then times out.
pub async fn create_app_call_txn<N, W>(
    node: &N,
    sender: &str,
    app_id: u64,
    app_args: Vec<Vec<u8>>,
    wallet: &W,
) -> LedgerResult<String>
where
    N: NodePort + ?Sized,
    W: WalletPort + ?Sized,
{
    let params = node.transaction_params().await?;
    let suggested = SuggestedParams::try_from(&params)?;

    let txn = AppCallTransaction::no_op(sender, &suggested, app_id, app_args)?;
    let local_id = txn.id()?;
    tracing::debug!(
        "Built app call {} to app {} (fee {}, valid {}..{})",
        local_id,
        app_id,
        txn.fee,
        txn.first_valid,
        txn.last_valid
    );

    let signed_groups = wallet
        .sign_transactions(vec![vec![SignerTransaction::new(txn)]])
        .await?;

    let raw: Vec<u8> = signed_groups.into_iter().flatten().flatten().collect();
    if raw.is_empty() {
        return Err(LedgerError::Signing("wallet returned no signed transactions".into()));
    }

    let response = node.send_raw_transaction(raw).await?;
    tracing::info!("Submitted app call {} to app {}", response.tx_id, app_id);

    wait_for_confirmation(node, &response.tx_id, None).await?;

    Ok(response.tx_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Address;
    use crate::ports::mocks::MockNode;
    use crate::ports::wallet::MockWalletPort;
    use crate::ports::models::PendingTransactionInfo;

    fn sender() -> String {
        Address::new([5u8; 32]).to_string()
    }

    #[tokio::test]
    async fn test_happy_path_passes_nested_shape_to_wallet() {
        let node = MockNode::new(1000).with_submit_tx_id("TXOK").with_confirmation(1001);

        let mut wallet = MockWalletPort::new();
        wallet
            .expect_sign_transactions()
            .withf(|groups| {
                groups.len() == 1
                    && groups[0].len() == 1
                    && groups[0][0].signers.is_none()
                    && groups[0][0].txn.app_id == 42
                    && groups[0][0].txn.first_valid == 1000
                    && groups[0][0].txn.last_valid == 2000
                    && groups[0][0].txn.app_args == vec![b"verify".to_vec()]
            })
            .times(1)
            .returning(|_| Ok(vec![vec![vec![0xaa, 0xbb]]]));

        let tx_id = create_app_call_txn(&node, &sender(), 42, vec![b"verify".to_vec()], &wallet)
            .await
            .unwrap();

        assert_eq!(tx_id, "TXOK");
        assert_eq!(node.submitted(), vec![vec![0xaa, 0xbb]]);
        assert_eq!(node.pending_calls(), vec!["TXOK".to_string()]);
    }

    #[tokio::test]
    async fn test_params_failure_stops_before_signing() {
        let node = MockNode::new(1)
            .with_params_error(LedgerError::Network("API error 503: node catching up".into()));
        let mut wallet = MockWalletPort::new();
        wallet.expect_sign_transactions().times(0);

        let err = create_app_call_txn(&node, &sender(), 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Network(ref m) if m.contains("catching up")));
        assert!(node.submitted().is_empty());
        assert!(node.pending_calls().is_empty());
    }

    #[tokio::test]
    async fn test_same_outcome_with_debug_logging() {
        fn signing_wallet() -> MockWalletPort {
            let mut wallet = MockWalletPort::new();
            wallet.expect_sign_transactions().returning(|_| Ok(vec![vec![vec![7]]]));
            wallet
        }

        let quiet = MockNode::new(50).with_confirmation(50);
        let quiet_id = create_app_call_txn(&quiet, &sender(), 3, vec![b"x".to_vec()], &signing_wallet())
            .await
            .unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let loud = MockNode::new(50).with_confirmation(50);
        let loud_id = create_app_call_txn(&loud, &sender(), 3, vec![b"x".to_vec()], &signing_wallet())
            .await
            .unwrap();

        assert_eq!(quiet_id, loud_id);
        assert_eq!(quiet.submitted(), loud.submitted());
    }

    #[tokio::test]
    async fn test_invalid_sender_never_reaches_wallet() {
        let node = MockNode::new(1);
        let mut wallet = MockWalletPort::new();
        wallet.expect_sign_transactions().times(0);

        let err = create_app_call_txn(&node, "bogus", 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransactionConstruction(_)));
        assert!(node.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_wallet_rejection_propagates() {
        let node = MockNode::new(1);
        let mut wallet = MockWalletPort::new();
        wallet
            .expect_sign_transactions()
            .returning(|_| Err(LedgerError::Signing("user rejected".into())));

        let err = create_app_call_txn(&node, &sender(), 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Signing("user rejected".into()));
        assert!(node.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_empty_signature_set_is_not_submitted() {
        let node = MockNode::new(1);
        let mut wallet = MockWalletPort::new();
        wallet.expect_sign_transactions().returning(|_| Ok(vec![vec![]]));

        let err = create_app_call_txn(&node, &sender(), 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Signing(_)));
        assert!(node.submitted().is_empty());
    }

    #[tokio::test]
    async fn test_submission_error_propagates() {
        let node = MockNode::new(1)
            .with_submit_error(LedgerError::Submission("fee too small".into()));
        let mut wallet = MockWalletPort::new();
        wallet.expect_sign_transactions().returning(|_| Ok(vec![vec![vec![1]]]));

        let err = create_app_call_txn(&node, &sender(), 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Submission("fee too small".into()));
        assert!(node.pending_calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_timeout_propagates() {
        let node = MockNode::new(1)
            .with_pending(PendingTransactionInfo::default());
        let mut wallet = MockWalletPort::new();
        wallet.expect_sign_transactions().returning(|_| Ok(vec![vec![vec![1]]]));

        let err = create_app_call_txn(&node, &sender(), 1, vec![], &wallet)
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::ConfirmationTimeout { rounds: 4 });
        // the submission itself went through
        assert_eq!(node.submitted().len(), 1);
    }
}
