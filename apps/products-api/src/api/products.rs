//! Products API routes

use axum::Router;
use domain_products::{handlers, PgProductStore, ProductService};

use crate::state::{AppState, StoreHandle};

/// Create products router over the configured store
pub fn router(state: &AppState) -> Router {
    match &state.store {
        StoreHandle::Postgres(db) => {
            handlers::router(ProductService::new(PgProductStore::new(db.clone())))
        }
        StoreHandle::InMemory(store) => handlers::router(ProductService::new(store.clone())),
    }
}
