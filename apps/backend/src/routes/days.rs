//! Countdown day endpoints (`/days`)

use axum::{
    extract::{Path, State},
    http::Method,
    routing::get,
    Json, Router,
};
use tower_http::services::ServeDir;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::service::ServiceSpec;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "days-master",
    prefix: "/days",
    methods: &[
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ],
    schema: &[r#"
        CREATE TABLE IF NOT EXISTS days_master (
            id BIGSERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            time TIMESTAMPTZ NOT NULL
        )
        "#],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/list", get(list))
        .route("/{id}", get(get_one).put(update).delete(remove))
        .nest_service("/public", ServeDir::new(state.public_dir.clone()))
        .with_state(state)
}

/// GET / and GET /list return all countdowns, ascending by target time.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CountdownResponse>>> {
    let rows = state.db.list_countdowns().await?;
    Ok(Json(rows.iter().map(Countdown::to_response).collect()))
}

/// GET /{id}
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CountdownResponse>> {
    let row = state
        .db
        .get_countdown(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("countdown {} does not exist", id)))?;

    Ok(Json(row.to_response()))
}

/// POST /. The target arrives as a calendar date, stored as midnight UTC.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CountdownCreateRequest>,
) -> Result<Json<CountdownResponse>> {
    if request.content.is_empty() {
        return Err(ApiError::BadRequest(
            "content must not be empty".to_string(),
        ));
    }

    let row = state
        .db
        .insert_countdown(&request.content, date_to_timestamp(request.time))
        .await?;

    Ok(Json(row.to_response()))
}

/// PUT /{id} is a partial update; only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<CountdownUpdateRequest>,
) -> Result<Json<CountdownResponse>> {
    if request.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let row = state
        .db
        .update_countdown(
            id,
            request.content.as_deref(),
            request.time.map(date_to_timestamp),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("countdown {} does not exist", id)))?;

    Ok(Json(row.to_response()))
}

/// DELETE /{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeletedResponse>> {
    let deleted = state.db.delete_countdown(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!(
            "countdown {} does not exist",
            id
        )));
    }

    Ok(Json(DeletedResponse {
        status: "ok".to_string(),
        deleted_id: id,
    }))
}
