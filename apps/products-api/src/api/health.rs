//! Readiness endpoint

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::check_health;

use crate::state::{AppState, StoreHandle};

/// `503` while the database cannot be reached. The in-memory store is
/// always ready.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let checks: Vec<(&str, HealthCheckFuture)> = match &state.store {
        StoreHandle::Postgres(db) => vec![(
            "database",
            Box::pin(async move { check_health(db).await.map_err(|e| e.to_string()) }),
        )],
        StoreHandle::InMemory(_) => Vec::new(),
    };

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
