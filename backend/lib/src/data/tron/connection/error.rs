use thiserror::Error;

/// Error type for Tron node operations
#[derive(Debug, Error)]
pub enum TronConnectionError {
    /// The node does not know the account
    #[error("Account not found: {0}")]
    AddressNotFound(String),

    /// The address is not a valid base58check Tron address
    #[error("Invalid address: {0}")]
    BadAddress(String),

    /// The node answered with an error payload
    #[error("API error: {0}")]
    Api(String),

    /// Network or transport-related errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Connection closed or unavailable
    #[error("Connection closed")]
    ConnectionClosed,

    /// Request timeout errors
    #[error("Request timeout")]
    Timeout,

    /// Other errors
    #[error("Other error: {0}")]
    Other(String),
}

impl TronConnectionError {
    /// Whether the error is about the requested address rather than the node
    pub fn is_address_error(&self) -> bool {
        matches!(self, Self::AddressNotFound(_) | Self::BadAddress(_))
    }
}

/// Result type for Tron node operations
pub type TronResult<T> = Result<T, TronConnectionError>;

/// Trait for types that can be converted to Tron connection errors
pub trait IntoTronError {
    /// Convert this error into a `TronConnectionError`
    fn into_tron_error(self) -> TronConnectionError;
}

impl IntoTronError for reqwest::Error {
    fn into_tron_error(self) -> TronConnectionError {
        if self.is_timeout() {
            TronConnectionError::Timeout
        } else if self.is_decode() {
            TronConnectionError::Serialization(self.to_string())
        } else if self.is_connect() || self.is_request() || self.is_status() {
            TronConnectionError::Transport(self.to_string())
        } else {
            TronConnectionError::Other(self.to_string())
        }
    }
}
