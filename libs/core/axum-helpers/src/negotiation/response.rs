use super::{MediaFormat, Representation, encode};
use crate::errors::AppError;
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// A representation encoded in the negotiated format.
///
/// The response always carries the `Content-Type` of the chosen format.
///
/// ```ignore
/// async fn show(Accepts(format): Accepts) -> Negotiated<Widget> {
///     Negotiated::ok(format, widget)
/// }
/// ```
#[derive(Debug)]
pub struct Negotiated<T> {
    format: MediaFormat,
    status: StatusCode,
    value: T,
}

impl<T: Representation> Negotiated<T> {
    pub fn new(format: MediaFormat, status: StatusCode, value: T) -> Self {
        Self {
            format,
            status,
            value,
        }
    }

    pub fn ok(format: MediaFormat, value: T) -> Self {
        Self::new(format, StatusCode::OK, value)
    }

    pub fn created(format: MediaFormat, value: T) -> Self {
        Self::new(format, StatusCode::CREATED, value)
    }
}

impl<T: Representation> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match encode(self.format, &self.value) {
            Ok(body) => (
                self.status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(self.format.mime()))],
                body,
            )
                .into_response(),
            Err(e) => AppError::InternalServerError(format!(
                "failed to encode {} response: {}",
                self.format, e
            ))
            .render(self.format),
        }
    }
}
