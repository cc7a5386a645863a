//! Route definitions for the Tron wallet API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::services::Services;

/// Creates the router with all API routes
pub fn routes(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Wallet endpoints
        .route("/wallet/get_all", get(handlers::get_all))
        .route("/wallet/", post(handlers::create_wallet))
        // Add state to all routes
        .with_state(services)
}
