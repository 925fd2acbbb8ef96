//! Application state management

use database::postgres::DatabaseConnection;
use domain_products::InMemoryProductStore;

/// Backing store chosen at startup
#[derive(Clone)]
pub enum StoreHandle {
    Postgres(DatabaseConnection),
    InMemory(InMemoryProductStore),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: StoreHandle,
}
