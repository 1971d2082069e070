//! Text notice endpoints (`/notice`)

use axum::{extract::State, http::Method, routing::get, Json, Router};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::models::Notice;
use crate::service::ServiceSpec;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "notice-text",
    prefix: "/notice",
    methods: &[Method::GET, Method::PUT, Method::OPTIONS],
    schema: &[
        r#"
        CREATE TABLE IF NOT EXISTS notice_text (
            title TEXT NOT NULL UNIQUE,
            context TEXT NOT NULL
        )
        "#,
        r#"
        INSERT INTO notice_text (title, context)
        VALUES ('notice', 'This is a sample notice')
        ON CONFLICT (title) DO NOTHING
        "#,
    ],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(current).put(update))
        .with_state(state)
}

/// GET /. The first row by title order is "the" notice; an empty table
/// yields an empty object.
pub async fn current(State(state): State<AppState>) -> Result<Json<Value>> {
    match state.db.current_notice().await? {
        Some(notice) => Ok(Json(serde_json::json!({
            "title": notice.title,
            "context": notice.context,
        }))),
        None => Ok(Json(serde_json::json!({}))),
    }
}

/// PUT / upserts by title.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<Notice>,
) -> Result<Json<Notice>> {
    if request.title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }

    let notice = state
        .db
        .upsert_notice(&request.title, &request.context)
        .await?;

    Ok(Json(notice))
}
