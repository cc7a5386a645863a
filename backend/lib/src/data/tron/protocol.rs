//! Request and response payloads of the Tron full node HTTP API

use serde::{Deserialize, Serialize};

/// Body of the per-account endpoints
#[derive(Debug, Clone, Serialize)]
pub struct AccountRequest<'a> {
    pub address: &'a str,
    /// Addresses are given and returned in base58check form
    pub visible: bool,
}

impl<'a> AccountRequest<'a> {
    pub fn new(address: &'a str) -> Self {
        Self {
            address,
            visible: true,
        }
    }
}

/// Subset of `wallet/getaccount` the backend reads.
///
/// The node answers `{}` for accounts it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub address: Option<String>,
    /// TRX balance in sun, absent for accounts that never held TRX
    #[serde(default)]
    pub balance: i64,
}

/// Bandwidth and energy figures of `wallet/getaccountresource`.
///
/// The node omits zero-valued fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResource {
    #[serde(rename = "freeNetUsed", default)]
    pub free_net_used: i64,
    #[serde(rename = "freeNetLimit", default)]
    pub free_net_limit: i64,
    #[serde(rename = "EnergyLimit", default)]
    pub energy_limit: i64,
    #[serde(rename = "EnergyUsed", default)]
    pub energy_used: i64,
}
