//! Products Domain
//!
//! CRUD over a single product entity, exposed over HTTP in JSON, XML and
//! YAML.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, negotiation, input validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules, one transaction per operation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Store    │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, wire representation
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductStore, ProductService};
//!
//! let service = ProductService::new(InMemoryProductStore::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{Product, ProductCount, ProductRepresentation};
pub use postgres::PgProductStore;
pub use repository::{InMemoryProductStore, ProductStore, ProductTransaction};
pub use service::ProductService;
