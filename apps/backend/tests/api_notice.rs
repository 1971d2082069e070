//! Notice text API tests.
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
async fn seeded_notice_is_served() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    // Bootstrap seeds a default row, so the table is never empty here.
    let response = server.get("/notice/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["title"].is_string());
    assert!(body["context"].is_string());
}

#[tokio::test]
#[ignore = "requires database"]
async fn upsert_by_title_replaces_context() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .put("/notice/")
        .json(&json!({ "title": "itest_notice", "context": "first text" }))
        .await;
    response.assert_status_ok();

    let response = server
        .put("/notice/")
        .json(&json!({ "title": "itest_notice", "context": "second text" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "itest_notice");
    assert_eq!(body["context"], "second text");

    // Cleanup
    ctx.delete_notice_title("itest_notice").await;
}

// Validation happens before any query, so this runs without a database.

#[tokio::test]
async fn empty_title_is_rejected() {
    let ctx = TestContext::new_lazy();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .put("/notice/")
        .json(&json!({ "title": "", "context": "text" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}
