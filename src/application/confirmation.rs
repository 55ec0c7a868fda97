//! Confirmation Polling
//!
//! Waits for a submitted transaction to be committed, counting rounds
//! rather than wall-clock time.

use crate::ports::models::{LedgerError, LedgerResult, PendingTransactionInfo};
use crate::ports::NodePort;

/// Rounds to wait when the caller does not specify a timeout
pub const DEFAULT_CONFIRMATION_ROUNDS: u64 = 4;

/// Poll `tx_id` until it reports a confirmed round.
///
/// Checks once per round, starting at the node's current round, and gives up
/// once `timeout` rounds (default 4) have passed without confirmation. There
/// is no way to abort the wait early; drop the future to stop polling.
pub async fn wait_for_confirmation<N>(
    node: &N,
    tx_id: &str,
    timeout: Option<u64>,
) -> LedgerResult<PendingTransactionInfo>
where
    N: NodePort + ?Sized,
{
    let timeout = timeout.unwrap_or(DEFAULT_CONFIRMATION_ROUNDS);
    let start_round = node.status().await?.last_round;
    let mut current_round = start_round;

    tracing::debug!(
        "Waiting for {} from round {} (timeout {} rounds)",
        tx_id,
        start_round,
        timeout
    );

    while current_round < start_round.saturating_add(timeout) {
        let pending = node.pending_transaction_information(tx_id).await?;

        if let Some(round) = pending.confirmed() {
            tracing::info!("Transaction {} confirmed in round {}", tx_id, round);
            return Ok(pending);
        }

        if !pending.pool_error.is_empty() {
            tracing::warn!("Transaction {} rejected from pool: {}", tx_id, pending.pool_error);
            return Err(LedgerError::Submission(format!(
                "transaction {} rejected from pool: {}",
                tx_id, pending.pool_error
            )));
        }

        current_round += 1;
        node.status_after_block(current_round).await?;
    }

    Err(LedgerError::ConfirmationTimeout { rounds: timeout })
}
