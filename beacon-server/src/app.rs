use crate::SignalingService;
use crate::api::room_routes;
use crate::config::ServerConfig;
use crate::signaling::ws_handler;
use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Full HTTP surface: the signaling socket, the room query routes and a
/// liveness probe, all sharing one [`SignalingService`].
pub fn router(service: SignalingService, config: &ServerConfig) -> Router {
    Router::new()
        .route(&config.signal_path, get(ws_handler))
        .route("/health", get(health))
        .merge(room_routes())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> &'static str {
    "OK"
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Binds `config.bind_address` and serves until `shutdown` resolves.
pub async fn serve<F>(config: ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    serve_on(listener, SignalingService::new(), config, shutdown).await
}

/// Serves on an already bound listener.
pub async fn serve_on<F>(
    listener: TcpListener,
    service: SignalingService,
    config: ServerConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(
        "Signaling server listening on http://{} (socket path {})",
        addr, config.signal_path
    );

    let app = router(service, &config);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server terminated with an error")?;

    info!("Signaling server stopped");
    Ok(())
}
