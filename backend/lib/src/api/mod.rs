//! API module for the Tron wallet backend

pub mod handlers;
pub mod routes;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        Method,
    },
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::Services;

/// Creates the axum application with all routes and middleware
pub fn create_app(services: Services) -> Router {
    let router = routes::routes(services);

    // Add CORS layer for permissive access
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .allow_credentials(false);

    router.layer(cors).layer(TraceLayer::new_for_http())
}

#[cfg(test)]
/// Create a test application
///
/// This function creates a test application with mock services.
pub async fn mock_app() -> Router {
    let services = Services::mocks().await.expect("able to create mock services");
    create_app(services)
}
