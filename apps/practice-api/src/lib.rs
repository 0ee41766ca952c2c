pub mod config;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use latex_drill_core::{Clock, EquivalenceTable, QualityPolicy, Sm2, SystemClock};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<EquivalenceTable>,
    pub scheduler: Arc<Sm2>,
    pub quality: Arc<QualityPolicy>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        table: EquivalenceTable,
        scheduler: Sm2,
        quality: QualityPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            table: Arc::new(table),
            scheduler: Arc::new(scheduler),
            quality: Arc::new(quality),
            clock,
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/answers/check", post(routes::answers::check))
        .route("/api/reviews/schedule", post(routes::reviews::schedule))
        .route("/api/reviews/queue", post(routes::reviews::queue))
        .route("/api/practice/submit", post(routes::practice::submit))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let table = config.load_table()?;

    let state = AppState::new(
        table,
        config.scheduler.clone(),
        config.quality.clone(),
        Arc::new(SystemClock),
    );

    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
