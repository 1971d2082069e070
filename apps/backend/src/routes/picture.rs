//! Notice picture endpoints (`/picture`)
//!
//! The table holds exactly one row, enforced by a constant-key primary key
//! rather than handler discipline; updates are single-statement upserts.

use axum::{extract::State, http::Method, routing::get, Json, Router};

use crate::error::{ApiError, Result};
use crate::models::{PictureUpdateRequest, UrlResponse};
use crate::service::ServiceSpec;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "notice-picture",
    prefix: "/picture",
    methods: &[Method::GET, Method::PUT, Method::OPTIONS],
    schema: &[
        r#"
        CREATE TABLE IF NOT EXISTS notice_picture (
            slot BOOLEAN PRIMARY KEY DEFAULT TRUE CHECK (slot),
            url TEXT NOT NULL
        )
        "#,
        "INSERT INTO notice_picture (slot, url) VALUES (TRUE, 'url') ON CONFLICT (slot) DO NOTHING",
    ],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(current).put(update))
        .with_state(state)
}

/// GET / returns the current picture URL, null when unset.
pub async fn current(State(state): State<AppState>) -> Result<Json<UrlResponse>> {
    let url = state.db.current_picture_url().await?;
    Ok(Json(UrlResponse { url }))
}

/// PUT / replaces the stored URL atomically.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<PictureUpdateRequest>,
) -> Result<Json<UrlResponse>> {
    let clean = request.new_url.trim();
    if clean.is_empty() {
        return Err(ApiError::BadRequest("url must not be empty".to_string()));
    }

    let url = state.db.set_picture_url(clean).await?;
    Ok(Json(UrlResponse { url: Some(url) }))
}
