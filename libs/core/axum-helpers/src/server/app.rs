use super::shutdown::shutdown_signal;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, extract::DefaultBodyLimit, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Wraps the API routes with the shared middleware stack.
///
/// This function sets up:
/// - API routes at the root
/// - 404 and 405 fallbacks that answer with an error document
/// - Request tracing and security headers
/// - CORS, only when `cors_origins` is non-empty
/// - Response compression based on `Accept-Encoding`
/// - The request body limit from `server.max_body_size`
///
/// Health endpoints (/health, /ready) should be merged by the app using
/// `health_router()` and its own ready handler.
///
/// # Errors
/// Returns `InvalidInput` if an origin in `cors_origins` is not a valid
/// header value.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new()
///     .nest("/products", products_router)
///     .with_state(state);
///
/// let router = create_router(api_routes, &ServerConfig::default(), &[])?;
/// ```
pub fn create_router(
    apis: Router,
    server: &ServerConfig,
    cors_origins: &[String],
) -> io::Result<Router> {
    let mut router = Router::new()
        .merge(apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    if cors_origins.is_empty() {
        info!("CORS disabled, no allowed origins configured");
    } else {
        info!("CORS configured with allowed origins: {}", cors_origins.join(","));
        router = router.layer(create_cors_layer(cors_origins)?);
    }

    Ok(router
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(server.max_body_size)))
}

/// Serves `router` until SIGINT/SIGTERM, then runs `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts. `cleanup` is
/// abandoned with a warning once `shutdown_timeout` elapses.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(_) => info!("Cleanup completed successfully"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
