//! Services module for the Tron wallet backend

pub mod health;
pub mod wallet;

use std::sync::Arc;

use crate::data::{
    db::{Repository, SmartPool, TronWallet},
    tron::TronClient,
};
#[cfg(any(test, feature = "mocks"))]
use crate::data::{
    db::RepositoryResult,
    tron::{AnyTronConnection, MockConnection},
};

#[derive(Clone)]
pub struct Services {
    pub wallet: Arc<wallet::WalletService>,
    pub health: Arc<health::HealthService>,
}

impl Services {
    pub fn new(pool: Arc<SmartPool>, tron: Arc<TronClient>) -> Self {
        let repository = Arc::new(Repository::<TronWallet>::new(Arc::clone(&pool)));
        let wallet = Arc::new(wallet::WalletService::new(repository, Arc::clone(&tron)));
        let health = Arc::new(health::HealthService::new(pool, tron));

        Self { wallet, health }
    }
}

#[cfg(any(test, feature = "mocks"))]
impl Services {
    /// Services over a fresh in-memory database and a mocked Tron node
    pub async fn mocks() -> RepositoryResult<Self> {
        Self::with_mock_connection(MockConnection::new()).await
    }

    /// Services over a fresh in-memory database and the given mocked Tron node
    pub async fn with_mock_connection(mock: MockConnection) -> RepositoryResult<Self> {
        let pool = Arc::new(SmartPool::in_memory().await?);
        let tron = Arc::new(TronClient::new(Arc::new(AnyTronConnection::Mock(mock))));

        Ok(Self::new(pool, tron))
    }
}
