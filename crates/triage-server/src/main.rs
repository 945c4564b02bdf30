//! Entry point for the triage-server binary.

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use triage_server::{
    config::{ConfigError, ServerConfig},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration; a missing JWT_SECRET is fatal here.
    let config = ServerConfig::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!("Starting triage-server");
    tracing::info!(
        "Configuration: port={}, log_level={}",
        config.port,
        config.log_level
    );

    // Load model artifacts. The server refuses to start without them
    // rather than serve unclassified complaints.
    let (vectorizer, model) = triage_model::artifacts::load(&config.artifact_paths())
        .map_err(|e| {
            tracing::error!(
                "Model artifacts unavailable: {e}. Run `triage clean` and `triage train` first."
            );
            e
        })?;
    tracing::info!(
        classes = model.classes().len(),
        "model loaded, departments: {:?}",
        model.classes()
    );

    let static_dir = config.static_dir.clone();
    let state = AppState::new(config.clone(), vectorizer, model);

    let cors = build_cors_layer(&config.cors_allowed_origins)?;

    let mut app: Router = routes::build_router(state);
    if static_dir.is_dir() {
        app = app.nest_service("/static", ServeDir::new(&static_dir));
        tracing::info!("Serving static assets from {}", static_dir.display());
    }
    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initialize the tracing subscriber.
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build CORS layer from configuration.
///
/// A malformed origin is a startup failure like any other bad
/// configuration, not a panic.
fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    if allowed_origins == "*" {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in allowed_origins.split(',') {
        let origin = origin.trim();
        origins.push(
            origin
                .parse()
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))?,
        );
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
