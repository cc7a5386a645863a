//! Typed Tron node client

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::data::{
    db::Balance,
    tron::{
        address,
        connection::error::{TronConnectionError, TronResult},
        endpoints,
        protocol::{Account, AccountRequest, AccountResource},
        AnyTronConnection, TronConnection,
    },
};

/// Tron node client that uses a TronConnection
pub struct TronClient {
    connection: Arc<AnyTronConnection>,
}

impl TronClient {
    /// Create a new TronClient with the given connection
    pub fn new(connection: Arc<AnyTronConnection>) -> Self {
        Self { connection }
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.is_connected().await
    }

    /// TRX balance of `address`, given in any form [`address::to_base58check`] accepts.
    ///
    /// Fails with [`TronConnectionError::AddressNotFound`] when the node does not
    /// know the account.
    pub async fn get_account_balance(&self, address: &str) -> TronResult<Balance> {
        let address = address::to_base58check(address)?;
        debug!(target: "tron::client::get_account_balance", address = %address, "Tron call: get_account_balance");

        let account: Value = self
            .connection
            .call(endpoints::GET_ACCOUNT, AccountRequest::new(&address))
            .await?;

        if account.as_object().is_some_and(|fields| fields.is_empty()) {
            return Err(TronConnectionError::AddressNotFound(address));
        }

        let account: Account = serde_json::from_value(account).map_err(|e| {
            TronConnectionError::Serialization(format!("Failed to deserialize account: {}", e))
        })?;

        Ok(Balance::from_sun(account.balance))
    }

    /// Bandwidth and energy figures of `address`
    pub async fn get_account_resource(&self, address: &str) -> TronResult<AccountResource> {
        let address = address::to_base58check(address)?;
        debug!(target: "tron::client::get_account_resource", address = %address, "Tron call: get_account_resource");

        self.connection
            .call(endpoints::GET_ACCOUNT_RESOURCE, AccountRequest::new(&address))
            .await
    }
}
