use axum::{extract::State, Json};

use crate::{
    data::db::Page,
    error::Error,
    models::wallet::{CreateWalletRequest, WalletAccountResponse},
    services::{health::DetailedHealthStatus, Services},
};

pub mod pagination;

use pagination::Pagination;

// ==================== Health Handler ====================

pub async fn health_check(State(services): State<Services>) -> Json<DetailedHealthStatus> {
    Json(services.health.check_health().await)
}

// ==================== Wallet Handlers ====================

pub async fn get_all(
    State(services): State<Services>,
    Pagination(params): Pagination,
) -> Result<Json<Page<WalletAccountResponse>>, Error> {
    let page = services.wallet.list_all(params).await?;
    Ok(Json(page.map(WalletAccountResponse::from)))
}

pub async fn create_wallet(
    State(services): State<Services>,
    Json(payload): Json<CreateWalletRequest>,
) -> Result<Json<WalletAccountResponse>, Error> {
    let wallet = services
        .wallet
        .create_from_address(&payload.address)
        .await?;
    Ok(Json(wallet.into()))
}
