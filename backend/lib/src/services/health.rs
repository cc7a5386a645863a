use std::sync::Arc;

use serde::Serialize;

use crate::{
    constants::server::SERVICE_NAME,
    data::{db::SmartPool, tron::TronClient},
};

const HEALTHY: &str = "healthy";
const UNHEALTHY: &str = "unhealthy";

#[derive(Debug, Serialize)]
pub struct DetailedHealthStatus {
    pub status: String,
    pub version: String,
    pub service: String,
    pub components: HealthComponents,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
    pub database: ComponentHealth,
    pub tron: ComponentHealth,
}

#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    fn healthy() -> Self {
        Self {
            status: HEALTHY.to_string(),
            message: None,
        }
    }

    fn unhealthy(message: String) -> Self {
        Self {
            status: UNHEALTHY.to_string(),
            message: Some(message),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

pub struct HealthService {
    pool: Arc<SmartPool>,
    tron: Arc<TronClient>,
}

impl HealthService {
    pub fn new(pool: Arc<SmartPool>, tron: Arc<TronClient>) -> Self {
        Self { pool, tron }
    }

    pub async fn check_health(&self) -> DetailedHealthStatus {
        let (database, tron) = tokio::join!(self.check_database(), self.check_tron());

        let overall_status = if database.is_healthy() && tron.is_healthy() {
            HEALTHY
        } else {
            UNHEALTHY
        };

        DetailedHealthStatus {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: SERVICE_NAME.to_string(),
            components: HealthComponents { database, tron },
        }
    }

    async fn check_database(&self) -> ComponentHealth {
        match self.pool.ping().await {
            Ok(()) => ComponentHealth::healthy(),
            Err(e) => ComponentHealth::unhealthy(format!("Database error: {}", e)),
        }
    }

    async fn check_tron(&self) -> ComponentHealth {
        match self.tron.is_connected().await {
            true => ComponentHealth::healthy(),
            false => ComponentHealth::unhealthy("Tron node not reachable".to_string()),
        }
    }
}
