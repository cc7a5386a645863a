//! Tron full node client module

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub mod address;
pub mod client;
pub mod connection;
pub mod endpoints;
pub mod http_connection;
#[cfg(any(test, feature = "mocks"))]
pub mod mock_connection;
pub mod protocol;

pub use client::TronClient;
pub use connection::{
    error::{TronConnectionError, TronResult},
    AnyTronConnection, TronEndpoint,
};
pub use http_connection::HttpConnection;
#[cfg(any(test, feature = "mocks"))]
pub use mock_connection::{ErrorMode, MockConnection};
pub use protocol::AccountResource;

/// Trait for connections to a Tron full node
#[async_trait]
pub trait TronConnection: Send + Sync {
    /// POST `params` as JSON to `endpoint` and decode the answer
    async fn call<P, R>(&self, endpoint: &str, params: P) -> TronResult<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned;

    /// Check if the node is currently reachable
    async fn is_connected(&self) -> bool;
}
