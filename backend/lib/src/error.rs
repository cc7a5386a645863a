use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::{
    constants::api::ADDRESS_NOT_FOUND_MSG,
    data::{db::RepositoryError, tron::TronConnectionError},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<TronConnectionError> for Error {
    fn from(err: TronConnectionError) -> Self {
        if err.is_address_error() {
            Error::BadRequest(ADDRESS_NOT_FOUND_MSG.to_string())
        } else {
            Error::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        if status.is_server_error() {
            warn!(target: "api::error", status = %status, message = %message, "Request failed");
        }

        let body = Json(json!({
            "detail": message
        }));

        (status, body).into_response()
    }
}
