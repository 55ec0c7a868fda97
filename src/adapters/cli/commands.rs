//! CLI Command Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::AppArg;

/// AlgoHealX - Algorand ledger access for the medicine supply chain
#[derive(Parser, Debug)]
#[command(
    name = "algohealx",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Algorand ledger access for AlgoHealX contracts",
    long_about = "Query accounts and application state on Algorand, and submit \
                  application calls to the AlgoHealX contracts, waiting for confirmation."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TestNet defaults when missing)
    #[arg(short, long, global = true, value_name = "FILE", default_value = "config/testnet.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show node status
    Status(StatusCmd),

    /// Show account balance and opted-in apps
    Account(AccountCmd),

    /// Show decoded global state of an application
    AppState(AppStateCmd),

    /// Submit a NoOp application call and wait for confirmation
    Call(CallCmd),

    /// Wait for a submitted transaction to confirm
    Wait(WaitCmd),

    /// Generate a new local signing key
    Keygen(KeygenCmd),
}

#[derive(Parser, Debug)]
pub struct StatusCmd {
    /// Also report indexer health
    #[arg(long)]
    pub indexer: bool,
}

#[derive(Parser, Debug)]
pub struct AccountCmd {
    /// Account address
    #[arg(value_name = "ADDRESS")]
    pub address: String,

    /// Query the indexer instead of the node
    #[arg(long)]
    pub indexer: bool,

    /// Print as JSON, including fields not shown in the summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AppStateCmd {
    /// App id or contract name (e.g. MEDICINE_REGISTRY)
    #[arg(value_name = "APP")]
    pub app: String,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct CallCmd {
    /// App id or contract name (e.g. VERIFICATION_CONTRACT)
    #[arg(value_name = "APP")]
    pub app: String,

    /// Application argument: str:<text>, int:<n> or b64:<data> (repeatable)
    #[arg(short, long = "arg", value_name = "ARG")]
    pub args: Vec<AppArg>,

    /// Override keypair path
    #[arg(long, value_name = "FILE")]
    pub keypair: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct WaitCmd {
    /// Transaction id
    #[arg(value_name = "TXID")]
    pub tx_id: String,

    /// Rounds to wait (defaults to confirmation.timeout_rounds)
    #[arg(long, value_name = "N")]
    pub rounds: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct KeygenCmd {
    /// Output file (defaults to wallet.keypair_path)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Overwrite an existing key file
    #[arg(long)]
    pub force: bool,
}
