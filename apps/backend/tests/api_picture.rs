//! Notice picture API tests.
//!
//! DB-backed tests require a running PostgreSQL database; set DATABASE_URL
//! and run with --include-ignored.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;

use common::TestContext;

#[tokio::test]
#[ignore = "requires database"]
async fn second_update_wins_and_table_stays_singleton() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .put("/picture/")
        .json(&json!({ "new_url": "http://example.com/a.png" }))
        .await;
    response.assert_status_ok();

    let response = server
        .put("/picture/")
        .json(&json!({ "new_url": "http://example.com/b.png" }))
        .await;
    response.assert_status_ok();

    let response = server.get("/picture/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "http://example.com/b.png");

    assert_eq!(ctx.picture_row_count().await, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_trims_surrounding_whitespace() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .put("/picture/")
        .json(&json!({ "new_url": "  http://example.com/padded.png  " }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["url"], "http://example.com/padded.png");
}

// Validation happens before any query, so this runs without a database.

#[tokio::test]
async fn empty_url_is_rejected() {
    let ctx = TestContext::new_lazy();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.put("/picture/").json(&json!({ "new_url": "   " })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
