//! CLI Adapter
//!
//! Command-line interface for the AlgoHealX ledger tool.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{
    AccountCmd, AppStateCmd, CallCmd, CliApp, Command, KeygenCmd, StatusCmd, WaitCmd,
};
