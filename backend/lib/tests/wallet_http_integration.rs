//! End-to-end tests: HTTP API backed by a SQLite file and a stubbed Tron node

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use tron_wallet_backend_lib::{
    config::DatabaseConfig,
    create_app,
    data::{
        db::SmartPool,
        tron::{AnyTronConnection, HttpConnection, TronClient, TronEndpoint},
    },
    services::Services,
};

const ADDRESS: &str = "TLRwhvNxnDjCDFo6YS6Vkbn5uo59CQM4Lf";

async fn stub_node(account: Value, resource: Value) -> ServerGuard {
    let mut node = Server::new_async().await;
    node.mock("POST", "/wallet/getaccount")
        .match_header("TRON-PRO-API-KEY", "test-token")
        .match_body(Matcher::PartialJson(json!({ "address": ADDRESS })))
        .with_status(200)
        .with_body(account.to_string())
        .create_async()
        .await;
    node.mock("POST", "/wallet/getaccountresource")
        .match_header("TRON-PRO-API-KEY", "test-token")
        .with_status(200)
        .with_body(resource.to_string())
        .create_async()
        .await;
    node
}

async fn app(node: &ServerGuard, db: &tempfile::TempDir) -> TestServer {
    let pool = SmartPool::new(&DatabaseConfig {
        path: db.path().join("wallets.db").to_string_lossy().into_owned(),
        max_connections: Some(4),
        connection_timeout_secs: Some(5),
    })
    .await
    .expect("able to create pool");
    pool.init_schema().await.expect("able to create schema");

    let endpoint = TronEndpoint {
        url: node.url(),
        api_key: Some("test-token".to_string()),
    };
    let conn = HttpConnection::new(endpoint, Some(5)).expect("able to build client");
    let tron = Arc::new(TronClient::new(Arc::new(AnyTronConnection::Http(conn))));

    TestServer::new(create_app(Services::new(Arc::new(pool), tron))).unwrap()
}

#[tokio::test]
async fn fetch_and_list_wallet() {
    let node = stub_node(
        json!({ "address": ADDRESS, "balance": 100_500_000 }),
        json!({ "freeNetUsed": 100, "freeNetLimit": 5000, "EnergyLimit": 10000, "EnergyUsed": 500 }),
    )
    .await;
    let db = tempfile::tempdir().unwrap();
    let server = app(&node, &db).await;

    let response = server.post("/wallet/").json(&json!({ "address": ADDRESS })).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let wallet: Value = response.json();
    assert_eq!(wallet["balance"], "100.500000");
    assert_eq!(wallet["energy_available"], 9500);
    assert_eq!(wallet["available_bandwidth"], 4900);

    let page: Value = server.get("/wallet/get_all").await.json();
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0], wallet);
}

#[tokio::test]
async fn unknown_account_is_rejected() {
    let node = stub_node(json!({}), json!({})).await;
    let db = tempfile::tempdir().unwrap();
    let server = app(&node, &db).await;

    let response = server.post("/wallet/").json(&json!({ "address": ADDRESS })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let page: Value = server.get("/wallet/get_all").await.json();
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn node_error_is_bad_gateway() {
    let node = stub_node(json!({ "Error": "node overloaded" }), json!({})).await;
    let db = tempfile::tempdir().unwrap();
    let server = app(&node, &db).await;

    let response = server.post("/wallet/").json(&json!({ "address": ADDRESS })).await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn hex_address_reaches_node_as_base58() {
    let node = stub_node(
        json!({ "address": ADDRESS, "balance": 1_000_000 }),
        json!({ "EnergyLimit": 10 }),
    )
    .await;
    let db = tempfile::tempdir().unwrap();
    let server = app(&node, &db).await;

    let response = server
        .post("/wallet/")
        .json(&json!({ "address": "4172bfb8852c7d84aa1793f580d055b17e016ae983" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let wallet: Value = response.json();
    assert_eq!(wallet["balance"], "1.000000");
    assert_eq!(wallet["energy_available"], 10);
}

#[tokio::test]
async fn padded_address_is_rejected() {
    let node = stub_node(json!({ "address": ADDRESS }), json!({})).await;
    let db = tempfile::tempdir().unwrap();
    let server = app(&node, &db).await;

    let response = server
        .post("/wallet/")
        .json(&json!({ "address": format!("{ADDRESS} ") }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["detail"], "Address not found or invalid");
}
