//! Tron node connection abstraction

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

#[cfg(any(test, feature = "mocks"))]
use crate::data::tron::mock_connection::MockConnection;
use crate::{
    config::TronConfig,
    constants::tron::{MAINNET_URL, NILE_URL, SHASTA_URL},
    data::tron::{http_connection::HttpConnection, TronConnection},
};

pub mod error;

use error::{TronConnectionError, TronResult};

/// Resolved upstream target: base URL plus the optional API key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TronEndpoint {
    pub url: String,
    pub api_key: Option<String>,
}

impl TronEndpoint {
    /// Resolve the upstream target from configuration.
    ///
    /// A custom provider is used only when both the provider URL and the token
    /// are configured; otherwise the public endpoint of the named network is used
    /// without a key.
    pub fn from_config(config: &TronConfig) -> TronResult<Self> {
        if let (Some(token), Some(provider)) = (&config.token, &config.provider) {
            return Ok(Self {
                url: provider.trim_end_matches('/').to_string(),
                api_key: Some(token.clone()),
            });
        }

        Ok(Self {
            url: Self::network_url(&config.network)?.to_string(),
            api_key: None,
        })
    }

    /// Public HTTP endpoint of a named network
    pub fn network_url(network: &str) -> TronResult<&'static str> {
        match network.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(MAINNET_URL),
            "shasta" => Ok(SHASTA_URL),
            "nile" => Ok(NILE_URL),
            other => Err(TronConnectionError::Other(format!(
                "Unknown Tron network: {other}"
            ))),
        }
    }
}

/// Enum wrapper for different Tron connection implementations
///
/// This enum allows using concrete types instead of trait objects, since
/// [`TronConnection::call`] is generic.
pub enum AnyTronConnection {
    /// Real HTTP connection
    Http(HttpConnection),

    /// Mock connection for testing
    #[cfg(any(test, feature = "mocks"))]
    Mock(MockConnection),
}

impl Debug for AnyTronConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyTronConnection::Http(_) => write!(f, "AnyTronConnection::Http(HttpConnection)"),
            #[cfg(any(test, feature = "mocks"))]
            AnyTronConnection::Mock(_) => write!(f, "AnyTronConnection::Mock(MockConnection)"),
        }
    }
}

#[async_trait]
impl TronConnection for AnyTronConnection {
    async fn call<P, R>(&self, endpoint: &str, params: P) -> TronResult<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        match self {
            AnyTronConnection::Http(conn) => conn.call(endpoint, params).await,
            #[cfg(any(test, feature = "mocks"))]
            AnyTronConnection::Mock(conn) => conn.call(endpoint, params).await,
        }
    }

    async fn is_connected(&self) -> bool {
        match self {
            AnyTronConnection::Http(conn) => conn.is_connected().await,
            #[cfg(any(test, feature = "mocks"))]
            AnyTronConnection::Mock(conn) => conn.is_connected().await,
        }
    }
}
