//! HTTP gateway for RestFeed.
//!
//! Serves one JSON Feed route per content type with an enabled feed, an
//! OPTIONS description of each route's schema, and a health check.
//!
//! Built on Axum.

pub mod routes;

use axum::{
    Router,
    http::{Method, header},
    response::Json,
    routing::get,
};
use restfeed_config::AppConfig;
use restfeed_core::error::StoreError;
use restfeed_core::store::ContentStore;
use restfeed_feed::FeedService;
use restfeed_store::{FileStore, InMemoryStore};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub feed: Arc<FeedService>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with the health check and every feed route.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(routes::feed_router(&state.feed))
        .fallback(routes::no_route)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for feed reads. Any origin may fetch a feed.
///
/// Applied per GET handler: the layer answers every OPTIONS request itself,
/// which would shadow the schema description.
pub(crate) fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Open the configured content store.
///
/// Without a content path the store starts empty.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn ContentStore>, StoreError> {
    match &config.content.path {
        Some(path) => Ok(Arc::new(FileStore::open(path)?)),
        None => {
            info!("No content path configured, serving an empty store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Build the feed service described by `config` on top of `store`.
pub fn feed_service(config: &AppConfig, store: Arc<dyn ContentStore>) -> FeedService {
    FeedService::new(store, config.site_settings(), config.content_types())
        .with_namespace(&config.feed.namespace)
        .with_version(config.spec_version())
        .with_skip_backward_compatibility(config.feed.skip_backward_compatibility)
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let store = open_store(&config)?;
    let feed = Arc::new(feed_service(&config, store));
    let feeds = feed.feed_types().count();
    let app = build_router(Arc::new(GatewayState { feed }));

    info!(addr = %addr, feeds, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
