//! AlgoHealX - Algorand ledger access tool
//!
//! Queries accounts and contract state, and submits app calls to the
//! AlgoHealX supply-chain contracts.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use algohealx_ledger::adapters::cli::{
    AccountCmd, AppStateCmd, CallCmd, CliApp, Command, KeygenCmd, StatusCmd, WaitCmd,
};
use algohealx_ledger::adapters::LocalWallet;
use algohealx_ledger::application::{
    create_app_call_txn, get_account_info, get_application_state, wait_for_confirmation,
};
use algohealx_ledger::config::{load_config_or_default, Config};
use algohealx_ledger::domain::{format_algo_amount, parse_application_state, AppArg};
use algohealx_ledger::ports::{IndexerPort, NodePort};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (tokens go here, not in the config file)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    let config = load_config_or_default(&app.config)
        .with_context(|| format!("Failed to load configuration from {}", app.config.display()))?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    match app.command {
        Command::Status(cmd) => status_command(&config, cmd).await,
        Command::Account(cmd) => account_command(&config, cmd).await,
        Command::AppState(cmd) => app_state_command(&config, cmd).await,
        Command::Call(cmd) => call_command(&config, cmd).await,
        Command::Wait(cmd) => wait_command(&config, cmd).await,
        Command::Keygen(cmd) => keygen_command(&config, cmd),
    }
}

fn init_logging(verbose: bool, debug: bool, configured: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(configured)
            .with_context(|| format!("Invalid log level '{}'", configured))?
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

async fn status_command(config: &Config, cmd: StatusCmd) -> Result<()> {
    let node = config.network.algod_client()?;
    let status = node.status().await.context("Failed to get node status")?;

    println!("Node:        {}", node.base_url());
    println!("Last round:  {}", status.last_round);
    if !status.last_version.is_empty() {
        println!("Protocol:    {}", status.last_version);
    }

    if cmd.indexer {
        let indexer = config.network.indexer_client()?;
        let health = indexer.health().await.context("Failed to get indexer health")?;
        println!("Indexer:     {} (round {}, db available: {})",
            indexer.base_url(), health.round, health.db_available);
    }

    Ok(())
}

async fn account_command(config: &Config, cmd: AccountCmd) -> Result<()> {
    let account = if cmd.indexer {
        let indexer = config.network.indexer_client()?;
        indexer.lookup_account(&cmd.address).await
            .context("Failed to look up account on indexer")?
            .account
    } else {
        let node = config.network.algod_client()?;
        get_account_info(&node, &cmd.address).await
            .context("Failed to get account information")?
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&account)?);
        return Ok(());
    }

    println!("Address:     {}", account.address);
    println!("Balance:     {} ALGO", display_algos(account.amount));
    println!("Min balance: {} ALGO", display_algos(account.min_balance));
    println!("Status:      {}", account.status);

    if !account.apps_local_state.is_empty() {
        let ids: Vec<String> = account.apps_local_state.iter().map(|a| a.id.to_string()).collect();
        println!("Opted in:    {}", ids.join(", "));
    }
    if !account.created_apps.is_empty() {
        let ids: Vec<String> = account.created_apps.iter().map(|a| a.id.to_string()).collect();
        println!("Created:     {}", ids.join(", "));
    }

    Ok(())
}

async fn app_state_command(config: &Config, cmd: AppStateCmd) -> Result<()> {
    let app_id = config.resolve_app(&cmd.app)?;
    let node = config.network.algod_client()?;

    let app = get_application_state(&node, app_id).await
        .with_context(|| format!("Failed to get application {}", app_id))?;
    let state = parse_application_state(&app.params.global_state)
        .context("Failed to decode global state")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    println!("Application: {}", app.id);
    if let Some(creator) = &app.params.creator {
        println!("Creator:     {}", creator);
    }
    if state.is_empty() {
        println!("(no global state)");
    }
    for (key, value) in &state {
        match value {
            Some(value) => println!("  {} = {}", key, value),
            None => println!("  {} = <unknown type>", key),
        }
    }

    Ok(())
}

async fn call_command(config: &Config, cmd: CallCmd) -> Result<()> {
    let app_id = config.resolve_app(&cmd.app)?;

    let keypair_path = match &cmd.keypair {
        Some(path) => path.display().to_string(),
        None => config.wallet.get_keypair_path(),
    };
    let wallet = load_wallet_with_context(&keypair_path)?;

    let app_args = cmd.args.iter()
        .map(AppArg::to_bytes)
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid application argument")?;

    let node = config.network.algod_client()?;
    let sender = wallet.address().to_string();

    tracing::info!("Calling app {} from {} with {} args", app_id, sender, app_args.len());
    let tx_id = create_app_call_txn(&node, &sender, app_id, app_args, &wallet).await
        .with_context(|| format!("App call to {} failed", app_id))?;

    println!("Confirmed: {}", tx_id);
    Ok(())
}

async fn wait_command(config: &Config, cmd: WaitCmd) -> Result<()> {
    let node = config.network.algod_client()?;
    let rounds = cmd.rounds.unwrap_or(config.confirmation.timeout_rounds);

    let info = wait_for_confirmation(&node, &cmd.tx_id, Some(rounds)).await
        .with_context(|| format!("Transaction {} not confirmed", cmd.tx_id))?;

    match info.confirmed() {
        Some(round) => println!("Confirmed in round {}", round),
        None => println!("Confirmed"),
    }
    if let Some(app_id) = info.application_index {
        println!("Application: {}", app_id);
    }

    Ok(())
}

fn keygen_command(config: &Config, cmd: KeygenCmd) -> Result<()> {
    let path = match &cmd.out {
        Some(path) => path.display().to_string(),
        None => config.wallet.get_keypair_path(),
    };

    if Path::new(&path).exists() && !cmd.force {
        bail!("Key file already exists: {}\n\nUse --force to overwrite it.", path);
    }

    let wallet = LocalWallet::new_random();
    wallet.save_to_file(&path)
        .with_context(|| format!("Failed to write key file {}", path))?;

    println!("Address:  {}", wallet.address());
    println!("Key file: {}", path);
    println!("Fund it from the TestNet dispenser before submitting calls.");
    Ok(())
}

/// Load wallet with helpful error messages
fn load_wallet_with_context(keypair_path: &str) -> Result<LocalWallet> {
    if !Path::new(keypair_path).exists() {
        bail!(
            "Wallet file not found: {}\n\n\
             To create a new key, run:\n  \
             algohealx keygen --out {}\n\n\
             Or update 'keypair_path' in the [wallet] section of your config",
            keypair_path,
            keypair_path
        );
    }

    LocalWallet::from_file(keypair_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load wallet from '{}': {}\n\n\
             Expected format: JSON array of 32 or 64 bytes (e.g., [1,2,3,...])",
            keypair_path,
            e
        )
    })
}

fn display_algos(micro_algos: u64) -> String {
    match i64::try_from(micro_algos) {
        Ok(amount) => format_algo_amount(amount),
        Err(_) => format!("{} micro", micro_algos),
    }
}
