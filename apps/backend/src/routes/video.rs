//! Video endpoints (`/video`): the current video URL plus the on-disk
//! media directory (file listing and image upload).

use std::collections::BTreeMap;

use axum::{
    extract::{Multipart, State},
    http::Method,
    routing::{get, post},
    Json, Router,
};

use crate::error::{ApiError, Result};
use crate::models::{FileListResponse, UploadResponse, UrlResponse, VideoUpdateRequest};
use crate::service::ServiceSpec;
use crate::services::media;
use crate::AppState;

pub static SPEC: ServiceSpec = ServiceSpec {
    name: "video",
    prefix: "/video",
    methods: &[Method::GET, Method::PUT, Method::POST, Method::OPTIONS],
    schema: &[
        r#"
        CREATE TABLE IF NOT EXISTS video (
            slot BOOLEAN PRIMARY KEY DEFAULT TRUE CHECK (slot),
            url TEXT NOT NULL
        )
        "#,
        "INSERT INTO video (slot, url) VALUES (TRUE, 'url') ON CONFLICT (slot) DO NOTHING",
    ],
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_urls).put(update_url))
        .route("/files", get(list_files))
        .route("/upload", post(upload))
        .with_state(state)
}

/// GET / returns every stored row flattened into a url-to-url map; rows
/// sharing a URL collapse onto one key.
pub async fn list_urls(State(state): State<AppState>) -> Result<Json<BTreeMap<String, String>>> {
    let urls = state.db.video_urls().await?;
    Ok(Json(urls.into_iter().map(|u| (u.clone(), u)).collect()))
}

/// PUT / points the current URL at a file name under the video host.
pub async fn update_url(
    State(state): State<AppState>,
    Json(request): Json<VideoUpdateRequest>,
) -> Result<Json<UrlResponse>> {
    let name = media::basename(request.filename.trim())
        .ok_or_else(|| ApiError::BadRequest("filename must not be empty".to_string()))?;

    let full_url = format!("{}/{}", state.media.base_url(), name);
    let url = state.db.set_video_url(&full_url).await?;

    Ok(Json(UrlResponse { url: Some(url) }))
}

/// GET /files lists video files in the media directory.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let items = state.media.list_videos().await?;
    Ok(Json(FileListResponse { items }))
}

/// POST /upload accepts one image file, written under its basename.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ApiError::BadRequest("filename must not be empty".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("failed to read upload: {}", e)))?;

        let saved = state.media.save_image(&filename, &bytes).await?;
        return Ok(Json(UploadResponse { filename: saved }));
    }

    Err(ApiError::BadRequest("missing file field".to_string()))
}
