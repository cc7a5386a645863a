use serde::{Deserialize, Serialize};

use crate::data::db::{Balance, TronWallet};

/// Body of `POST /wallet/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub address: String,
}

/// Cached account snapshot as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletAccountResponse {
    pub id: i64,
    pub balance: Balance,
    pub free_net_used: i64,
    pub free_net_limit: i64,
    pub energy_limit: i64,
    pub energy_used: i64,
    pub energy_available: i64,
    pub available_bandwidth: i64,
}

impl From<TronWallet> for WalletAccountResponse {
    fn from(wallet: TronWallet) -> Self {
        Self {
            energy_available: wallet.energy_available(),
            available_bandwidth: wallet.available_bandwidth(),
            id: wallet.id,
            balance: wallet.balance,
            free_net_used: wallet.free_net_used,
            free_net_limit: wallet.free_net_limit,
            energy_limit: wallet.energy_limit,
            energy_used: wallet.energy_used,
        }
    }
}
