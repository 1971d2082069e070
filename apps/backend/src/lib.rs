pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod service;
pub mod services;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::db::Database;
use crate::service::ServiceSpec;
use crate::services::media::MediaStore;

/// State for one service's handlers: its own pool plus the file-serving
/// configuration shared across services.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub media: Arc<MediaStore>,
    pub public_dir: PathBuf,
}

type RouterFn = fn(AppState) -> Router;

/// The mounted services, in mount order.
pub fn mounted_services() -> [(&'static ServiceSpec, RouterFn); 6] {
    [
        (&routes::renmin::SPEC, routes::renmin::router),
        (&routes::days::SPEC, routes::days::router),
        (&routes::config::SPEC, routes::config::router),
        (&routes::video::SPEC, routes::video::router),
        (&routes::notice::SPEC, routes::notice::router),
        (&routes::picture::SPEC, routes::picture::router),
    ]
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let media = Arc::new(MediaStore::new(
        config.video_root.clone(),
        config.video_base_url.clone(),
    ));

    let mut app = Router::new().route("/health", get(health_check));
    let mut pools = Vec::new();

    // One dedicated pool per service, not shared.
    for (spec, build) in mounted_services() {
        tracing::info!(service = spec.name, "connecting to database...");
        let db = Database::connect(&config.database_url).await?;
        service::bootstrap(&db, spec).await?;

        let state = AppState {
            db: db.clone(),
            media: media.clone(),
            public_dir: config.public_dir.clone(),
        };
        app = app.nest(spec.prefix, build(state).layer(service::cors_layer(spec)));
        pools.push(db);
    }

    let app = app.layer(TraceLayer::new_for_http());
    let app = normalize_trailing_slash(app);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Best-effort cleanup; pool close reports nothing.
    for db in pools {
        db.close().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn health_check() -> &'static str {
    "OK"
}

/// Restore the `/<prefix>/` form of each nested service's root route.
///
/// Services are mounted with `Router::nest(prefix, ..)` and expose their
/// collection endpoint at `route("/")`. Under axum 0.8, `nest` matches the
/// bare prefix (`/days`) but not its trailing-slash form (`/days/`), which is
/// the canonical URL the clients call. Trimming a trailing slash before
/// routing makes both forms resolve to the same handler — mirroring the
/// slash-redirect behaviour of the original service.
pub fn normalize_trailing_slash(app: Router) -> Router {
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(app))
}
