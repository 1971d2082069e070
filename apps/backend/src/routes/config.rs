//! Key/value configuration endpoints (`/config`)

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::Method,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::service::ServiceSpec;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "config",
    prefix: "/config",
    methods: &[
        Method::GET,
        Method::PUT,
        Method::POST,
        Method::DELETE,
        Method::OPTIONS,
    ],
    schema: &[
        r#"
        CREATE TABLE IF NOT EXISTS config (
            key TEXT NOT NULL UNIQUE,
            value TEXT NOT NULL
        )
        "#,
        "INSERT INTO config (key, value) VALUES ('mode', 'default') ON CONFLICT (key) DO NOTHING",
    ],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_all))
        .route("/config/batch", post(batch_update))
        .route("/config/{key}", put(update).delete(remove))
        .with_state(state)
}

/// GET / returns the entire map as one flat object, keys ascending.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<BTreeMap<String, String>>> {
    let pairs = state.db.all_config().await?;
    Ok(Json(pairs.into_iter().map(|p| (p.key, p.value)).collect()))
}

/// PUT /config/{key} inserts or updates one pair.
pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(request): Json<ConfigValueRequest>,
) -> Result<Json<ConfigPair>> {
    if key.is_empty() {
        return Err(ApiError::BadRequest("key must not be empty".to_string()));
    }

    let pair = state.db.upsert_config(&key, &request.value).await?;
    Ok(Json(pair))
}

/// POST /config/batch upserts many pairs; entries whose value is not a
/// string are skipped silently, and only the processed count is reported.
pub async fn batch_update(
    State(state): State<AppState>,
    Json(configs): Json<BTreeMap<String, Value>>,
) -> Result<Json<BatchUpdateResponse>> {
    if configs.is_empty() {
        return Err(ApiError::BadRequest("batch must not be empty".to_string()));
    }

    let mut updated_count = 0;
    for (key, value) in &configs {
        let Some(value) = value.as_str() else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        state.db.upsert_config(key, value).await?;
        updated_count += 1;
    }

    Ok(Json(BatchUpdateResponse { updated_count }))
}

/// DELETE /config/{key}
pub async fn remove(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    let deleted = state.db.delete_config(&key).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(format!(
            "config key {} does not exist",
            key
        )));
    }

    Ok(Json(serde_json::json!({ "status": "ok", "key": key })))
}
