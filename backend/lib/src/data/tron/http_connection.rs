//! HTTP connection to a Tron full node
//!
//! Every call is a JSON POST to `{base_url}/{endpoint}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    constants::tron::API_KEY_HEADER,
    data::tron::{
        connection::{
            error::{IntoTronError, TronConnectionError, TronResult},
            TronEndpoint,
        },
        endpoints, TronConnection,
    },
};

/// Tron full node HTTP connection
pub struct HttpConnection {
    client: Client,
    endpoint: TronEndpoint,
}

impl HttpConnection {
    /// Create a new connection to `endpoint`.
    ///
    /// Requests never time out unless `timeout_secs` is given.
    pub fn new(endpoint: TronEndpoint, timeout_secs: Option<u64>) -> TronResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout_secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }

        let client = builder.build().map_err(|e| {
            TronConnectionError::Other(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client, endpoint })
    }

    fn post<P: Serialize + ?Sized>(&self, endpoint: &str, params: &P) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.endpoint.url, endpoint);
        let mut request = self.client.post(url).json(params);
        if let Some(api_key) = &self.endpoint.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        request
    }
}

#[async_trait]
impl TronConnection for HttpConnection {
    async fn call<P, R>(&self, endpoint: &str, params: P) -> TronResult<R>
    where
        P: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        debug!(target: "tron::http", endpoint = %endpoint, "POST");

        let response = self
            .post(endpoint, &params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(IntoTronError::into_tron_error)?;

        let value: Value = response
            .json()
            .await
            .map_err(IntoTronError::into_tron_error)?;

        // Failed calls still answer 200, with the reason under `Error`
        if let Some(error) = value.get("Error") {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(TronConnectionError::Api(message));
        }

        serde_json::from_value(value).map_err(|e| {
            TronConnectionError::Serialization(format!("Failed to deserialize response: {}", e))
        })
    }

    async fn is_connected(&self) -> bool {
        match self
            .post(endpoints::GET_NOW_BLOCK, &serde_json::json!({}))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(target: "tron::http", error = %e, "Node unreachable");
                false
            }
        }
    }
}
