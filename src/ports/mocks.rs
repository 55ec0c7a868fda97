//! Recording in-memory node for tests and offline runs

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::models::{
    Account, Application, LedgerError, LedgerResult, NodeStatus, PendingTransactionInfo,
    SubmitResponse, TransactionParams,
};
use super::node::NodePort;

/// Mock node that records calls and serves scripted responses.
///
/// Each `status_after_block(r)` advances the mock's last round to `r`.
/// Pending lookups pop scripted responses in order; once the script runs out
/// the transaction reports as still pending.
#[derive(Debug, Clone)]
pub struct MockNode {
    last_round: Arc<Mutex<u64>>,
    params: TransactionParams,
    params_error: Option<LedgerError>,
    pending: Arc<Mutex<VecDeque<PendingTransactionInfo>>>,
    submit_error: Option<LedgerError>,
    submit_tx_id: String,
    submitted: Arc<Mutex<Vec<Vec<u8>>>>,
    pending_calls: Arc<Mutex<Vec<String>>>,
    round_waits: Arc<Mutex<Vec<u64>>>,
    accounts: HashMap<String, Account>,
    applications: HashMap<u64, Application>,
}

impl MockNode {
    pub fn new(last_round: u64) -> Self {
        Self {
            last_round: Arc::new(Mutex::new(last_round)),
            params: TransactionParams {
                consensus_version: "mock".to_string(),
                fee: 0,
                genesis_hash: "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=".to_string(),
                genesis_id: "mocknet-v1".to_string(),
                last_round,
                min_fee: 1000,
            },
            params_error: None,
            pending: Arc::new(Mutex::new(VecDeque::new())),
            submit_error: None,
            submit_tx_id: "MOCKTXID".to_string(),
            submitted: Arc::new(Mutex::new(Vec::new())),
            pending_calls: Arc::new(Mutex::new(Vec::new())),
            round_waits: Arc::new(Mutex::new(Vec::new())),
            accounts: HashMap::new(),
            applications: HashMap::new(),
        }
    }

    /// Queue a pending-info response
    pub fn with_pending(self, info: PendingTransactionInfo) -> Self {
        self.pending.lock().unwrap().push_back(info);
        self
    }

    /// Queue a response confirming in `round`
    pub fn with_confirmation(self, round: u64) -> Self {
        self.with_pending(PendingTransactionInfo {
            confirmed_round: Some(round),
            ..Default::default()
        })
    }

    pub fn with_params(mut self, params: TransactionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_params_error(mut self, error: LedgerError) -> Self {
        self.params_error = Some(error);
        self
    }

    pub fn with_submit_error(mut self, error: LedgerError) -> Self {
        self.submit_error = Some(error);
        self
    }

    pub fn with_submit_tx_id(mut self, tx_id: &str) -> Self {
        self.submit_tx_id = tx_id.to_string();
        self
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.insert(account.address.to_string(), account);
        self
    }

    pub fn with_application(mut self, application: Application) -> Self {
        self.applications.insert(application.id, application);
        self
    }

    /// Raw bytes passed to `send_raw_transaction`
    pub fn submitted(&self) -> Vec<Vec<u8>> {
        self.submitted.lock().unwrap().clone()
    }

    /// Tx ids passed to `pending_transaction_information`
    pub fn pending_calls(&self) -> Vec<String> {
        self.pending_calls.lock().unwrap().clone()
    }

    /// Rounds passed to `status_after_block`
    pub fn round_waits(&self) -> Vec<u64> {
        self.round_waits.lock().unwrap().clone()
    }

    fn current_status(&self) -> NodeStatus {
        NodeStatus {
            last_round: *self.last_round.lock().unwrap(),
            last_version: "mock".to_string(),
            time_since_last_round: 0,
            catchup_time: 0,
        }
    }
}

#[async_trait]
impl NodePort for MockNode {
    async fn status(&self) -> LedgerResult<NodeStatus> {
        Ok(self.current_status())
    }

    async fn status_after_block(&self, round: u64) -> LedgerResult<NodeStatus> {
        self.round_waits.lock().unwrap().push(round);
        {
            let mut last = self.last_round.lock().unwrap();
            *last = (*last).max(round);
        }
        Ok(self.current_status())
    }

    async fn pending_transaction_information(
        &self,
        tx_id: &str,
    ) -> LedgerResult<PendingTransactionInfo> {
        self.pending_calls.lock().unwrap().push(tx_id.to_string());
        Ok(self.pending.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn transaction_params(&self) -> LedgerResult<TransactionParams> {
        if let Some(ref err) = self.params_error {
            return Err(err.clone());
        }
        let mut params = self.params.clone();
        params.last_round = *self.last_round.lock().unwrap();
        Ok(params)
    }

    async fn send_raw_transaction(&self, signed: Vec<u8>) -> LedgerResult<SubmitResponse> {
        if let Some(ref err) = self.submit_error {
            return Err(err.clone());
        }
        self.submitted.lock().unwrap().push(signed);
        Ok(SubmitResponse {
            tx_id: self.submit_tx_id.clone(),
        })
    }

    async fn account_information(&self, address: &str) -> LedgerResult<Account> {
        self.accounts
            .get(address)
            .cloned()
            .ok_or_else(|| LedgerError::Network(format!("account not found: {}", address)))
    }

    async fn application_by_id(&self, app_id: u64) -> LedgerResult<Application> {
        self.applications
            .get(&app_id)
            .cloned()
            .ok_or_else(|| LedgerError::Network(format!("application does not exist: {}", app_id)))
    }
}
