//! # Axum Helpers
//!
//! Building blocks for Axum services that speak several representation
//! formats.
//!
//! ## Modules
//!
//! - **[`negotiation`]**: Media-type selection and the JSON/XML/YAML codecs
//! - **[`errors`]**: The error document and the error-to-response translation
//! - **[`extractors`]**: Negotiating extractors (accepted format, validated body, numeric id)
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let config = ServerConfig::default();
//!     let router = create_router(api_routes, &config, &[])?;
//!
//!     create_production_app(router, &config, std::time::Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod negotiation;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorBody};

// Re-export negotiation types
pub use negotiation::{MediaFormat, Negotiated, Representation};

// Re-export extractors
pub use extractors::{Accepts, IdPath, ValidatedBody};
