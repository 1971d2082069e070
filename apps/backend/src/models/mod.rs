//! Database rows and API request/response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// === Quotes (renmindaily) ===

/// Quote row. `defination` is the historical column spelling, kept on the
/// wire for compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: i32,
    pub content: String,
    pub defination: String,
    pub theme: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteAddRequest {
    pub content: String,
    #[serde(default)]
    pub defination: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct QuoteUpdateRequest {
    pub content: Option<String>,
    pub defination: Option<String>,
    pub theme: Option<String>,
}

impl QuoteUpdateRequest {
    /// True when the body names nothing to change.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.defination.is_none() && self.theme.is_none()
    }
}

// === Countdowns (days_master) ===

/// Countdown row. `time` keeps full timestamp+zone precision in storage.
#[derive(Debug, Clone, FromRow)]
pub struct Countdown {
    pub id: i64,
    pub content: String,
    pub time: DateTime<Utc>,
}

impl Countdown {
    /// Wire shape: the target serializes as a calendar date only.
    pub fn to_response(&self) -> CountdownResponse {
        CountdownResponse {
            id: self.id,
            content: self.content.clone(),
            time: self.time.date_naive().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountdownResponse {
    pub id: i64,
    pub content: String,
    pub time: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CountdownCreateRequest {
    pub content: String,
    pub time: NaiveDate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountdownUpdateRequest {
    pub content: Option<String>,
    pub time: Option<NaiveDate>,
}

impl CountdownUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.time.is_none()
    }
}

/// Calendar date to the stored representation (midnight UTC).
pub fn date_to_timestamp(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub status: String,
    pub deleted_id: i64,
}

// === Config ===

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConfigPair {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigValueRequest {
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchUpdateResponse {
    pub updated_count: usize,
}

// === Notice ===

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notice {
    pub title: String,
    pub context: String,
}

// === Picture / video ===

#[derive(Debug, Serialize, Deserialize)]
pub struct PictureUpdateRequest {
    pub new_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoUpdateRequest {
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    pub items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}
