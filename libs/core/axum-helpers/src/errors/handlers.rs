use axum::{
    http::{HeaderMap, StatusCode},
    response::Response,
};

use super::{ErrorBody, messages};
use crate::negotiation::response_format;

/// Fallback for unknown routes.
///
/// Rendered in the client's negotiated format when its `Accept` header is
/// usable, in the default format otherwise.
pub async fn not_found(headers: HeaderMap) -> Response {
    ErrorBody::new(StatusCode::NOT_FOUND, messages::NOT_FOUND, messages::ROUTE_NOT_FOUND)
        .render(response_format(&headers).unwrap_or_default())
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed(headers: HeaderMap) -> Response {
    ErrorBody::new(
        StatusCode::METHOD_NOT_ALLOWED,
        messages::METHOD_NOT_ALLOWED,
        messages::METHOD_NOT_SUPPORTED,
    )
    .render(response_format(&headers).unwrap_or_default())
}
