//! Shared service scaffolding.
//!
//! Every mounted service is described by a [`ServiceSpec`]: its mount
//! prefix, the literal HTTP method list its routes need (mirrored into the
//! CORS policy), and the idempotent DDL that bootstraps its table.

use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::db::Database;
use crate::error::Result;

/// Static description of one mounted service.
pub struct ServiceSpec {
    pub name: &'static str,
    pub prefix: &'static str,
    /// Methods this service's routes answer; the CORS allow-list.
    pub methods: &'static [Method],
    /// DDL statements run in order at startup. Each must be safe to repeat
    /// across restarts (IF NOT EXISTS / ON CONFLICT DO NOTHING).
    pub schema: &'static [&'static str],
}

/// Run a service's schema statements against its own pool.
pub async fn bootstrap(db: &Database, spec: &ServiceSpec) -> Result<()> {
    for statement in spec.schema {
        sqlx::query(statement).execute(db.pool()).await?;
    }
    tracing::info!(service = spec.name, "schema ready");
    Ok(())
}

/// All origins, the service's literal method list, all headers.
pub fn cors_layer(spec: &ServiceSpec) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(spec.methods.to_vec())
        .allow_headers(Any)
}
