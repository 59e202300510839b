//! Server configuration and startup.

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD);
    let cors = cors_layer(&state.config);

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))
        // Investors
        .nest("/investors", investor_routes())
        .nest("/api/v1/investors", investor_routes())
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Investor routes.
fn investor_routes() -> Router<AppState> {
    Router::new()
        .route("/upload-csv", post(routes::investors::upload_csv))
        .route("/summary", get(routes::investors::summary))
        .route("/summary-filtered", get(routes::investors::summary_filtered))
        .route("/asset-classes", get(routes::investors::asset_classes))
        .route("/stats", get(routes::investors::stats))
        .route("/{investor_id}/details", get(routes::investors::details))
}

/// CORS policy from the configured origins.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.cors_origins.iter().any(|o| o.trim() == "*") {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}

/// Run the server until Ctrl-C or SIGTERM.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Pledge server listening on http://{}", addr);
    info!("API endpoints:");
    info!("  GET  /health");
    info!("  POST /investors/upload-csv");
    info!("  GET  /investors/summary");
    info!("  GET  /investors/summary-filtered");
    info!("  GET  /investors/{{investor_id}}/details");
    info!("  GET  /investors/asset-classes");
    info!("  GET  /investors/stats");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutting down...");
}
