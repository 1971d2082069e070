//! Daily quote endpoints (`/renmin`)

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::services::ServeDir;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::service::ServiceSpec;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "renmin-daily",
    prefix: "/renmin",
    methods: &[
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ],
    schema: &[
        r#"
        CREATE TABLE IF NOT EXISTS renmindaily (
            id SERIAL PRIMARY KEY,
            content TEXT NOT NULL,
            defination TEXT NOT NULL,
            theme TEXT NOT NULL DEFAULT ''
        )
        "#,
        // theme arrived after the table shipped; older installs lack it.
        "ALTER TABLE renmindaily ADD COLUMN IF NOT EXISTS theme TEXT NOT NULL DEFAULT ''",
    ],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(random))
        .route("/add", post(add))
        .route("/update/{id}", put(update))
        .route("/delete/{id}", delete(remove))
        .nest_service("/public", ServeDir::new(state.public_dir.clone()))
        .with_state(state)
}

/// GET / picks one quote uniformly at random.
pub async fn random(State(state): State<AppState>) -> Result<Json<Quote>> {
    let quote = state
        .db
        .random_quote()
        .await?
        .ok_or_else(|| ApiError::NotFound("no quotes stored".to_string()))?;

    Ok(Json(quote))
}

/// POST /add. Optional fields default to empty strings, never null.
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<QuoteAddRequest>,
) -> Result<(StatusCode, Json<Quote>)> {
    if request.content.is_empty() {
        return Err(ApiError::BadRequest(
            "content must not be empty".to_string(),
        ));
    }

    let defination = request.defination.unwrap_or_default();
    let theme = request.theme.unwrap_or_default();
    let quote = state
        .db
        .insert_quote(&request.content, &defination, &theme)
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

/// PUT /update/{id} is a partial update; only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<QuoteUpdateRequest>,
) -> Result<Json<Quote>> {
    if request.is_empty() {
        return Err(ApiError::BadRequest("no fields to update".to_string()));
    }

    let quote = state
        .db
        .update_quote(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("quote {} does not exist", id)))?;

    Ok(Json(quote))
}

/// DELETE /delete/{id}. Absent ids 404 before the delete is attempted.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>> {
    if !state.db.quote_exists(id).await? {
        return Err(ApiError::NotFound(format!("quote {} does not exist", id)));
    }

    let deleted = state.db.delete_quote(id).await?;
    if deleted == 0 {
        // The row vanished between the existence check and the delete.
        return Err(ApiError::Internal(format!(
            "quote {} disappeared during delete",
            id
        )));
    }

    Ok(Json(DeletedResponse {
        status: "ok".to_string(),
        deleted_id: id as i64,
    }))
}
