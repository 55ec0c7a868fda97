pub mod keypair;

pub use keypair::{LocalWallet, WalletError};
