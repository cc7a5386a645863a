//! Persisted entity types

pub mod tron_wallet;

pub use tron_wallet::{Balance, NewTronWallet, TronWallet, TronWalletPatch};
