//! Negotiated request body with automatic validation.

use crate::errors::AppError;
use crate::negotiation::{decode, request_format, response_format};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Request body decoded according to its `Content-Type`, then validated.
///
/// Rejections:
/// - `415 Unsupported Media Type` for a missing or unregistered `Content-Type`
/// - `413 Payload Too Large` when the body exceeds the configured limit
/// - `400 Bad Request` when the body cannot be read or does not decode
/// - `400 Bad Request` with one detail per invalid field when validation fails
///
/// Decode and validation errors are rendered in the format the client
/// accepts. The body is only read once the `Content-Type` is known to be
/// supported.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize)]
/// struct Widget {
///     name: String,
/// }
///
/// impl Validate for Widget { /* ... */ }
///
/// async fn create(ValidatedBody(widget): ValidatedBody<Widget>) -> String {
///     format!("Creating widget: {}", widget.name)
/// }
/// ```
pub struct ValidatedBody<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedBody<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body_format = request_format(req.headers()).map_err(IntoResponse::into_response)?;
        let reply_format = response_format(req.headers()).unwrap_or_default();

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            let error = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(rejection.body_text())
            } else {
                AppError::BadRequest(format!("Corpo da requisição inválido: {}", rejection.body_text()))
            };
            error.render(reply_format)
        })?;

        let data: T = decode(body_format, &bytes).map_err(|e| {
            AppError::BadRequest(format!("Corpo da requisição inválido: {}", e)).render(reply_format)
        })?;

        data.validate()
            .map_err(|e| AppError::Validation(e).render(reply_format))?;

        Ok(ValidatedBody(data))
    }
}
