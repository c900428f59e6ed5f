use analytics::Dashboard;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The dashboard is computed before the server starts and is only read here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
}

/// Builds the API router over an already computed dashboard.
pub fn router(dashboard: Dashboard) -> Router {
    let app_state = Arc::new(AppState { dashboard });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/trades", get(handlers::get_trades))
        .route("/api/charts/pnl-by-sentiment", get(handlers::get_pnl_by_sentiment))
        .route(
            "/api/charts/win-rate-by-sentiment",
            get(handlers::get_win_rate_by_sentiment),
        )
        .route("/api/charts/cumulative-pnl", get(handlers::get_cumulative_pnl))
        .route("/api/load-report", get(handlers::get_load_report))
        .fallback(handlers::not_found)
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Serves the dashboard API until the process is stopped.
///
/// Tracing is initialized by the binary; this function only logs.
pub async fn run_server(addr: SocketAddr, dashboard: Dashboard) -> anyhow::Result<()> {
    let app = router(dashboard);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard API listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
