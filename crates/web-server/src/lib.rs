use axum::{routing::get, Router};
use configuration::Config;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod context;
pub mod error;
pub mod handlers;
pub mod service;

pub use context::AnalysisContext;
pub use service::QueryService;

/// The shared application state that all handlers can access.
///
/// Only the immutable query configuration is shared; every request derives
/// its own data.
#[derive(Clone)]
pub struct AppState {
    pub service: QueryService,
}

/// Builds the router serving the dashboard's query surface.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/prices", get(handlers::get_prices))
        .route("/api/events", get(handlers::get_events))
        .route("/api/change_points", get(handlers::get_change_points))
        .route("/api/correlations", get(handlers::get_correlations))
        .route("/api/metrics", get(handlers::get_metrics))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    // Tracing is already initialized by the caller.
    let service = QueryService::from_config(config)?;
    let app = build_router(Arc::new(AppState { service }));

    let addr = config.server.socket_addr();
    tracing::info!(
        %addr,
        prices = %config.data.prices_path.display(),
        events = %config.data.events_path.display(),
        "Web server started and listening."
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
