//! On-disk media directory for the video service.

use std::path::{Path, PathBuf};

use crate::error::{ApiError, Result};

/// Extensions listed by /video/files.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mkv", "mov", "wmv", "flv", "webm", "m4v"];

/// Extensions accepted by /video/upload.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Media directory backing the video service's file routes.
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
}

impl MediaStore {
    pub fn new(root: PathBuf, base_url: String) -> Self {
        Self { root, base_url }
    }

    /// URL prefix for stored video links, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Video file names in the media directory, sorted ascending.
    pub async fn list_videos(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(ApiError::Internal(format!(
                "media directory does not exist: {}",
                self.root.display()
            )));
        }

        let mut items = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_video_file(&name) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            items.push(name);
        }
        items.sort();

        Ok(items)
    }

    /// Write an uploaded image under its basename.
    ///
    /// Rejects non-image extensions and duplicate names; creates the media
    /// directory when missing.
    pub async fn save_image(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let name = basename(filename)
            .ok_or_else(|| ApiError::BadRequest("filename must not be empty".to_string()))?;
        if !is_image_file(&name) {
            return Err(ApiError::BadRequest(
                "only image files are accepted".to_string(),
            ));
        }

        tokio::fs::create_dir_all(&self.root).await?;

        let target = self.root.join(&name);
        if tokio::fs::try_exists(&target).await? {
            return Err(ApiError::Conflict(format!("file {} already exists", name)));
        }
        tokio::fs::write(&target, bytes).await?;

        Ok(name)
    }
}

/// Strip a client-supplied name down to its final path component.
pub fn basename(filename: &str) -> Option<String> {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

pub fn is_video_file(filename: &str) -> bool {
    extension_of(filename).map_or(false, |ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_image_file(filename: &str) -> bool {
    extension_of(filename).map_or(false, |ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
