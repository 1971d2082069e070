//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::Result;
use crate::models::*;

/// Connections per pool. Each service owns one pool, so this stays small.
const MAX_CONNECTIONS: u32 = 5;

/// Database wrapper with connection pool.
///
/// The pool is built with `test_before_acquire`, so every handle checked out
/// by a request has just passed a liveness probe; stale connections are
/// discarded and reopened inside the pool rather than by racing handlers.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create a connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the pool without opening a connection. Connections are
    /// established on first use; routes that never touch the database work
    /// against an unreachable URL.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .test_before_acquire(true)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close the pool, releasing every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // === Quote Repository (renmindaily) ===

    /// One quote chosen uniformly at random, if any exist.
    pub async fn random_quote(&self) -> Result<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            SELECT id, content, defination, theme
            FROM renmindaily
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    pub async fn insert_quote(
        &self,
        content: &str,
        defination: &str,
        theme: &str,
    ) -> Result<Quote> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO renmindaily (content, defination, theme)
            VALUES ($1, $2, $3)
            RETURNING id, content, defination, theme
            "#,
        )
        .bind(content)
        .bind(defination)
        .bind(theme)
        .fetch_one(&self.pool)
        .await?;

        Ok(quote)
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update_quote(
        &self,
        id: i32,
        update: &QuoteUpdateRequest,
    ) -> Result<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE renmindaily
            SET content = COALESCE($2, content),
                defination = COALESCE($3, defination),
                theme = COALESCE($4, theme)
            WHERE id = $1
            RETURNING id, content, defination, theme
            "#,
        )
        .bind(id)
        .bind(update.content.as_deref())
        .bind(update.defination.as_deref())
        .bind(update.theme.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }

    pub async fn quote_exists(&self, id: i32) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM renmindaily WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    pub async fn delete_quote(&self, id: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM renmindaily WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // === Countdown Repository (days_master) ===

    /// All countdowns, ascending by target time.
    pub async fn list_countdowns(&self) -> Result<Vec<Countdown>> {
        let rows = sqlx::query_as::<_, Countdown>(
            r#"
            SELECT id, content, time
            FROM days_master
            ORDER BY time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_countdown(&self, id: i64) -> Result<Option<Countdown>> {
        let row = sqlx::query_as::<_, Countdown>(
            "SELECT id, content, time FROM days_master WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn insert_countdown(&self, content: &str, time: DateTime<Utc>) -> Result<Countdown> {
        let row = sqlx::query_as::<_, Countdown>(
            r#"
            INSERT INTO days_master (content, time)
            VALUES ($1, $2)
            RETURNING id, content, time
            "#,
        )
        .bind(content)
        .bind(time)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Partial update: absent fields keep their stored value.
    pub async fn update_countdown(
        &self,
        id: i64,
        content: Option<&str>,
        time: Option<DateTime<Utc>>,
    ) -> Result<Option<Countdown>> {
        let row = sqlx::query_as::<_, Countdown>(
            r#"
            UPDATE days_master
            SET content = COALESCE($2, content),
                time = COALESCE($3, time)
            WHERE id = $1
            RETURNING id, content, time
            "#,
        )
        .bind(id)
        .bind(content)
        .bind(time)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_countdown(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM days_master WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // === Config Repository ===

    /// Every pair, keys ascending.
    pub async fn all_config(&self) -> Result<Vec<ConfigPair>> {
        let pairs =
            sqlx::query_as::<_, ConfigPair>("SELECT key, value FROM config ORDER BY key ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(pairs)
    }

    /// Insert or update one pair, returning what is now stored.
    pub async fn upsert_config(&self, key: &str, value: &str) -> Result<ConfigPair> {
        let pair = sqlx::query_as::<_, ConfigPair>(
            r#"
            INSERT INTO config (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            RETURNING key, value
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.pool)
        .await?;

        Ok(pair)
    }

    pub async fn delete_config(&self, key: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM config WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // === Notice Repository (notice_text) ===

    /// The active notice: first row by title order.
    pub async fn current_notice(&self) -> Result<Option<Notice>> {
        let notice = sqlx::query_as::<_, Notice>(
            "SELECT title, context FROM notice_text ORDER BY title ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(notice)
    }

    /// Upsert by title.
    pub async fn upsert_notice(&self, title: &str, context: &str) -> Result<Notice> {
        let notice = sqlx::query_as::<_, Notice>(
            r#"
            INSERT INTO notice_text (title, context)
            VALUES ($1, $2)
            ON CONFLICT (title) DO UPDATE SET context = EXCLUDED.context
            RETURNING title, context
            "#,
        )
        .bind(title)
        .bind(context)
        .fetch_one(&self.pool)
        .await?;

        Ok(notice)
    }

    // === Picture Repository (notice_picture) ===

    pub async fn current_picture_url(&self) -> Result<Option<String>> {
        let url = sqlx::query_scalar("SELECT url FROM notice_picture LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(url)
    }

    /// Replace the singleton row in one statement; the table never passes
    /// through an empty state.
    pub async fn set_picture_url(&self, url: &str) -> Result<String> {
        let url = sqlx::query_scalar(
            r#"
            INSERT INTO notice_picture (slot, url)
            VALUES (TRUE, $1)
            ON CONFLICT (slot) DO UPDATE SET url = EXCLUDED.url
            RETURNING url
            "#,
        )
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(url)
    }

    // === Video Repository ===

    pub async fn video_urls(&self) -> Result<Vec<String>> {
        let urls = sqlx::query_scalar("SELECT url FROM video ORDER BY url ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(urls)
    }

    /// Same singleton replacement as the notice picture.
    pub async fn set_video_url(&self, url: &str) -> Result<String> {
        let url = sqlx::query_scalar(
            r#"
            INSERT INTO video (slot, url)
            VALUES (TRUE, $1)
            ON CONFLICT (slot) DO UPDATE SET url = EXCLUDED.url
            RETURNING url
            "#,
        )
        .bind(url)
        .fetch_one(&self.pool)
        .await?;

        Ok(url)
    }
}
