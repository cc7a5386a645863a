//! Mock Tron connection implementation for testing
//!
//! This module provides a mock connection that serves canned node answers and
//! can be configured with custom responses and error scenarios.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use tokio::sync::{Mutex, RwLock};

use crate::{
    constants::mocks::{
        MOCK_BALANCE_SUN, MOCK_ENERGY_LIMIT, MOCK_ENERGY_USED, MOCK_FREE_NET_LIMIT,
        MOCK_FREE_NET_USED,
    },
    data::tron::{
        connection::error::{TronConnectionError, TronResult},
        endpoints, TronConnection,
    },
};

/// Error simulation modes for testing
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorMode {
    /// No errors - all calls succeed
    None,
    /// Simulate transport error
    TransportError(String),
    /// Fail after N successful calls
    FailAfterNCalls(usize),
}

/// Mock Tron connection for testing
pub struct MockConnection {
    /// Responses overriding the canned ones, by endpoint
    responses: Arc<RwLock<HashMap<String, Value>>>,
    /// Error simulation mode
    error_mode: Arc<RwLock<ErrorMode>>,
    /// Whether the connection is "connected"
    connected: Arc<RwLock<bool>>,
    /// Calls that reached the node
    call_count: Arc<Mutex<usize>>,
}

impl MockConnection {
    /// Create a new mock connection
    ///
    /// The mock connection will have no faults configured
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom response for a specific endpoint
    pub async fn set_response(&self, endpoint: &str, response: Value) {
        let mut responses = self.responses.write().await;
        responses.insert(endpoint.to_string(), response);
    }

    /// Set the error simulation mode
    pub async fn set_error_mode(&self, mode: ErrorMode) {
        let mut error_mode = self.error_mode.write().await;
        *error_mode = mode;

        // Reset call count when changing error mode
        let mut call_count = self.call_count.lock().await;
        *call_count = 0;
    }

    /// Simulate disconnection
    pub async fn disconnect(&self) {
        let mut connected = self.connected.write().await;
        *connected = false;
    }

    /// Number of calls that reached the node since creation or the last error mode change
    pub async fn call_count(&self) -> usize {
        *self.call_count.lock().await
    }

    /// Check if we should simulate an error based on current mode
    async fn check_error(&self) -> TronResult<()> {
        let current_count = {
            let mut call_count = self.call_count.lock().await;
            *call_count += 1;
            *call_count
        };

        let error_mode = self.error_mode.read().await.clone();

        match error_mode {
            ErrorMode::None => Ok(()),
            ErrorMode::TransportError(msg) => Err(TronConnectionError::Transport(msg)),
            ErrorMode::FailAfterNCalls(n) => {
                if current_count > n {
                    Err(TronConnectionError::Api(
                        "Simulated failure after N calls".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Answer of a healthy node for `endpoint`
    fn canned_response(endpoint: &str, params: &Value) -> Value {
        match endpoint {
            endpoints::GET_ACCOUNT => json!({
                "address": params.get("address").cloned().unwrap_or(Value::Null),
                "balance": MOCK_BALANCE_SUN,
            }),
            endpoints::GET_ACCOUNT_RESOURCE => json!({
                "freeNetUsed": MOCK_FREE_NET_USED,
                "freeNetLimit": MOCK_FREE_NET_LIMIT,
                "EnergyLimit": MOCK_ENERGY_LIMIT,
                "EnergyUsed": MOCK_ENERGY_USED,
            }),
            endpoints::GET_NOW_BLOCK => json!({}),
            _ => Value::Null,
        }
    }
}

impl Default for MockConnection {
    fn default() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            error_mode: Arc::new(RwLock::new(ErrorMode::None)),
            connected: Arc::new(RwLock::new(true)),
            call_count: Arc::new(Mutex::new(0)),
        }
    }
}

#[async_trait]
impl TronConnection for MockConnection {
    async fn call<P, R>(&self, endpoint: &str, params: P) -> TronResult<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        // Global checks
        {
            let connected = self.connected.read().await;
            if !*connected {
                return Err(TronConnectionError::ConnectionClosed);
            }
        }

        self.check_error().await?;

        let params = serde_json::to_value(&params)
            .map_err(|e| TronConnectionError::Serialization(e.to_string()))?;

        let response = {
            let responses = self.responses.read().await;
            responses
                .get(endpoint)
                .cloned()
                .unwrap_or_else(|| Self::canned_response(endpoint, &params))
        };

        // Deserialize to expected type
        serde_json::from_value(response).map_err(|e| {
            TronConnectionError::Serialization(format!("Failed to deserialize response: {}", e))
        })
    }

    async fn is_connected(&self) -> bool {
        let connected = self.connected.read().await;
        *connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::test::{accounts::TEST_ADDRESS, mock_tron::*},
        data::tron::protocol::{AccountRequest, AccountResource},
    };

    fn no_params() -> Value {
        json!({})
    }

    #[tokio::test]
    async fn test_connection_basic() {
        let conn = MockConnection::new();

        conn.set_response(
            SAMPLE_ENDPOINT,
            json!({
                SAMPLE_FIELD: SAMPLE_VALUE
            }),
        )
        .await;

        let response: Value = conn.call(SAMPLE_ENDPOINT, no_params()).await.unwrap();
        assert_eq!(response[SAMPLE_FIELD], SAMPLE_VALUE);

        assert!(conn.is_connected().await);
        assert_eq!(conn.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_canned_account_data() {
        let conn = MockConnection::new();

        let account: Value = conn
            .call(endpoints::GET_ACCOUNT, AccountRequest::new(TEST_ADDRESS))
            .await
            .unwrap();
        assert_eq!(account["address"], TEST_ADDRESS);
        assert_eq!(account["balance"], MOCK_BALANCE_SUN);

        let resource: AccountResource = conn
            .call(endpoints::GET_ACCOUNT_RESOURCE, AccountRequest::new(TEST_ADDRESS))
            .await
            .unwrap();
        assert_eq!(resource.energy_limit, MOCK_ENERGY_LIMIT);
        assert_eq!(resource.free_net_used, MOCK_FREE_NET_USED);
    }

    #[tokio::test]
    async fn test_custom_response_overrides_canned() {
        let conn = MockConnection::new();
        conn.set_response(endpoints::GET_ACCOUNT, json!({})).await;

        let account: Value = conn
            .call(endpoints::GET_ACCOUNT, AccountRequest::new(TEST_ADDRESS))
            .await
            .unwrap();
        assert_eq!(account, json!({}));
    }

    #[tokio::test]
    async fn test_error_mode_transport_error() {
        let conn = MockConnection::new();
        conn.set_error_mode(ErrorMode::TransportError(
            TEST_TRANSPORT_ERROR_MSG.to_string(),
        ))
        .await;

        let result: TronResult<Value> = conn.call(SAMPLE_ENDPOINT, no_params()).await;
        match result {
            Err(TronConnectionError::Transport(msg)) => {
                assert_eq!(msg, TEST_TRANSPORT_ERROR_MSG);
            }
            _ => panic!("Expected transport error"),
        }
    }

    #[tokio::test]
    async fn test_error_mode_fail_after_n_calls() {
        let conn = MockConnection::new();
        conn.set_error_mode(ErrorMode::FailAfterNCalls(FAIL_AFTER_N_CALLS_THRESHOLD))
            .await;

        // First N calls should succeed
        for _ in 0..FAIL_AFTER_N_CALLS_THRESHOLD {
            let _: Value = conn
                .call(endpoints::GET_NOW_BLOCK, no_params())
                .await
                .unwrap();
        }

        // Next call should fail
        let result: TronResult<Value> = conn.call(endpoints::GET_NOW_BLOCK, no_params()).await;
        match result {
            Err(TronConnectionError::Api(msg)) => {
                assert!(msg.contains(ERROR_MESSAGE_FAIL_AFTER_N));
            }
            _ => panic!("Expected API error after N calls"),
        }
    }

    #[tokio::test]
    async fn test_connection_disconnect() {
        let conn = MockConnection::new();

        conn.disconnect().await;
        assert!(!conn.is_connected().await);

        let result: TronResult<Value> = conn.call(SAMPLE_ENDPOINT, no_params()).await;
        assert!(matches!(result, Err(TronConnectionError::ConnectionClosed)));
        assert_eq!(conn.call_count().await, 0);
    }
}
