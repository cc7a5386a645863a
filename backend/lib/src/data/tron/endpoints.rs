//! Tron full node HTTP API endpoints

/// Account details, including the TRX balance in sun
pub const GET_ACCOUNT: &str = "wallet/getaccount";

/// Bandwidth and energy quotas and usage
pub const GET_ACCOUNT_RESOURCE: &str = "wallet/getaccountresource";

/// Latest block, used as a liveness probe
pub const GET_NOW_BLOCK: &str = "wallet/getnowblock";
