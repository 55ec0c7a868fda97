//! State queries

use crate::domain::{parse_application_state, ApplicationState};
use crate::ports::models::{Account, Application, LedgerResult};
use crate::ports::NodePort;

pub async fn get_account_info<N: NodePort + ?Sized>(node: &N, address: &str) -> LedgerResult<Account> {
    node.account_information(address).await
}

pub async fn get_application_state<N: NodePort + ?Sized>(
    node: &N,
    app_id: u64,
) -> LedgerResult<Application> {
    node.application_by_id(app_id).await
}

/// Fetch an application and decode its global state
pub async fn get_global_state<N: NodePort + ?Sized>(
    node: &N,
    app_id: u64,
) -> LedgerResult<ApplicationState> {
    let app = get_application_state(node, app_id).await?;
    Ok(parse_application_state(&app.params.global_state)?)
}
