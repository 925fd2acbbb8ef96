use crate::errors::AppError;
use crate::negotiation::response_format;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::Response,
};

/// Numeric resource identifier from a single path parameter.
///
/// Rejects with `400 Bad Request` when the segment is not an integer.
///
/// # Example
/// ```ignore
/// async fn show(IdPath(id): IdPath) -> String {
///     format!("Product {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(show));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let format = response_format(&parts.headers).unwrap_or_default();

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).render(format))?;

        raw.parse::<i64>()
            .map(IdPath)
            .map_err(|_| AppError::BadRequest(format!("Identificador inválido: {}", raw)).render(format))
    }
}
