//! Configuration constants for the Tron wallet backend


/// Default server configuration
pub mod server {
    /// Default HTTP listening host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP server port
    pub const DEFAULT_PORT: u16 = 8080;

    /// Service name reported in logs and health checks
    pub const SERVICE_NAME: &str = "tron-wallet-backend";
}

/// Tron node client configuration
pub mod tron {
    /// Default named network used when no custom provider is configured
    pub const DEFAULT_NETWORK: &str = "shasta";

    /// Public HTTP endpoint of the Tron mainnet
    pub const MAINNET_URL: &str = "https://api.trongrid.io";

    /// Public HTTP endpoint of the Shasta testnet
    pub const SHASTA_URL: &str = "https://api.shasta.trongrid.io";

    /// Public HTTP endpoint of the Nile testnet
    pub const NILE_URL: &str = "https://nile.trongrid.io";

    /// Header carrying the provider API key
    pub const API_KEY_HEADER: &str = "TRON-PRO-API-KEY";

    /// Amount of sun in one TRX
    pub const SUN_PER_TRX: i64 = 1_000_000;

    /// Fractional digits of a TRX amount
    pub const TRX_DECIMALS: i64 = 6;

    /// Version byte prefixing every Tron account address
    pub const ADDRESS_PREFIX: u8 = 0x41;
}

/// Database configuration
pub mod database {
    /// Default SQLite database path
    pub const DEFAULT_DB_PATH: &str = "tron_wallet.db";

    /// Path that selects a private in-memory SQLite database
    pub const IN_MEMORY_DB_PATH: &str = ":memory:";

    /// Default maximum database connections
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

    /// Default database connection timeout in seconds
    pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;
}

/// API configuration constants
pub mod api {
    /// Default page index (1-based) for paginated responses
    pub const DEFAULT_PAGE: i64 = 1;

    /// Default page size for paginated API responses
    pub const DEFAULT_PAGE_SIZE: i64 = 50;

    /// Maximum allowed page size for paginated API responses
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Message returned when the upstream rejects or does not know an address
    pub const ADDRESS_NOT_FOUND_MSG: &str = "Address not found or invalid";
}

/// Canned upstream data served by the mock Tron connection
pub mod mocks {
    /// Balance, in sun, reported for every account
    pub const MOCK_BALANCE_SUN: i64 = 100_500_000;

    /// Free bandwidth already consumed
    pub const MOCK_FREE_NET_USED: i64 = 100;

    /// Free bandwidth quota
    pub const MOCK_FREE_NET_LIMIT: i64 = 5000;

    /// Energy quota
    pub const MOCK_ENERGY_LIMIT: i64 = 10000;

    /// Energy already consumed
    pub const MOCK_ENERGY_USED: i64 = 500;
}
