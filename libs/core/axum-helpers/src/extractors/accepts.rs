use crate::negotiation::{MediaFormat, response_format};
use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Response format negotiated from the `Accept` header.
///
/// Rejects with `406 Not Acceptable` when no listed media type is
/// registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepts(pub MediaFormat);

impl<S> FromRequestParts<S> for Accepts
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        response_format(&parts.headers)
            .map(Accepts)
            .map_err(IntoResponse::into_response)
    }
}
