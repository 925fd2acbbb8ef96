//! HTTP handlers for Products API
//!
//! | Route                      | Success        | Body                  |
//! |----------------------------|----------------|-----------------------|
//! | `POST /products`           | 201 Created    | created product       |
//! | `GET /products`            | 200 OK         | list of products      |
//! | `GET /products/count`      | 200 OK         | number of products    |
//! | `GET /products/{id}`       | 200 OK         | product               |
//! | `PUT /products/{id}`       | 200 OK         | updated product       |
//! | `DELETE /products/{id}`    | 204 No Content | none                  |
//!
//! Extractors run in declaration order, so an unacceptable `Accept` header
//! (406) is reported before an unsupported `Content-Type` (415).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_helpers::{Accepts, AppError, IdPath, MediaFormat, Negotiated, ValidatedBody};
use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::ProductRepresentation;
use crate::repository::ProductStore;
use crate::service::ProductService;

/// Create the products router with all HTTP endpoints
pub fn router<S: ProductStore + 'static>(service: ProductService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products::<S>).post(create_product::<S>))
        .route("/products/count", get(count_products::<S>))
        .route(
            "/products/{id}",
            get(get_product::<S>)
                .put(update_product::<S>)
                .delete(delete_product::<S>),
        )
        .with_state(shared_service)
}

/// Renders a service result: the value on success, an error body in the
/// negotiated format otherwise.
fn respond<T: IntoResponse>(format: MediaFormat, result: ProductResult<T>) -> Response {
    match result {
        Ok(value) => value.into_response(),
        Err(e) => AppError::from(e).render(format),
    }
}

async fn create_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
    ValidatedBody(input): ValidatedBody<ProductRepresentation>,
) -> Response {
    let result = service.create(input).await;
    respond(format, result.map(|product| Negotiated::created(format, product)))
}

async fn list_products<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
) -> Response {
    let result = service.list_all().await;
    respond(format, result.map(|products| Negotiated::ok(format, products)))
}

async fn get_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
    IdPath(id): IdPath,
) -> Response {
    let result = service.get_by_id(id).await;
    respond(format, result.map(|product| Negotiated::ok(format, product)))
}

async fn update_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
    IdPath(id): IdPath,
    ValidatedBody(input): ValidatedBody<ProductRepresentation>,
) -> Response {
    let result = service.update(id, input).await;
    respond(format, result.map(|product| Negotiated::ok(format, product)))
}

async fn delete_product<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
    IdPath(id): IdPath,
) -> Response {
    let result = service.delete(id).await;
    respond(format, result.map(|()| StatusCode::NO_CONTENT))
}

async fn count_products<S: ProductStore>(
    State(service): State<Arc<ProductService<S>>>,
    Accepts(format): Accepts,
) -> Response {
    let result = service.count().await;
    respond(format, result.map(|count| Negotiated::ok(format, count)))
}
