pub mod handlers;
pub mod messages;

use crate::negotiation::{MediaFormat, Representation, encode};
use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

/// Error document returned for every failed request.
///
/// - `status`: numeric HTTP status code
/// - `error`: short category label
/// - `message`: human-readable description
/// - `timestamp`: local time the error was produced
/// - `details`: one entry per invalid field, empty for other errors
///
/// # JSON Example
///
/// ```json
/// {
///   "status": 400,
///   "error": "Erro de validação nos campos",
///   "message": "Um ou mais campos estão inválidos",
///   "timestamp": "2025-03-01T10:15:30.123456",
///   "details": ["nome: O nome é obrigatório"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub details: Vec<String>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: error.into(),
            message: message.into(),
            timestamp: Local::now().naive_local(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Encodes the body in `format`, falling back to JSON if that fails.
    pub fn render(&self, format: MediaFormat) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let (format, body) = match encode(format, self) {
            Ok(body) => (format, body),
            Err(e) => {
                tracing::error!("Failed to encode error body as {}: {}", format, e);
                match encode(MediaFormat::Json, self) {
                    Ok(body) => (MediaFormat::Json, body),
                    Err(_) => return status.into_response(),
                }
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(format.mime()))],
            body,
        )
            .into_response()
    }
}

impl Representation for ErrorBody {
    const XML_ROOT: &'static str = "error";
}

/// Application error type that can be converted to HTTP responses.
///
/// [`AppError::to_body`] is the single translation from an error to the
/// document the client sees. Internal causes are logged, never exposed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Not Acceptable: {0}")]
    NotAcceptable(String),

    #[error("Unsupported Media Type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let status = self.status();

        match self {
            AppError::Validation(errors) => {
                ErrorBody::new(status, messages::VALIDATION_FAILED, messages::INVALID_FIELDS)
                    .with_details(validation_details(errors))
            }
            AppError::BadRequest(msg) => ErrorBody::new(status, messages::BAD_REQUEST, msg.as_str()),
            AppError::NotFound(msg) => ErrorBody::new(status, messages::NOT_FOUND, msg.as_str()),
            AppError::NotAcceptable(requested) => ErrorBody::new(
                status,
                messages::NOT_ACCEPTABLE,
                format!(
                    "Tipo de mídia não aceitável: {}. Tipos suportados: {}",
                    requested,
                    MediaFormat::supported()
                ),
            ),
            AppError::UnsupportedMediaType(received) => ErrorBody::new(
                status,
                messages::UNSUPPORTED_MEDIA_TYPE,
                format!(
                    "Content-Type não suportado: {}. Tipos suportados: {}",
                    received,
                    MediaFormat::supported()
                ),
            ),
            AppError::PayloadTooLarge(_) => {
                ErrorBody::new(status, messages::PAYLOAD_TOO_LARGE, messages::BODY_TOO_LARGE)
            }
            AppError::InternalServerError(_) => {
                ErrorBody::new(status, messages::INTERNAL_ERROR, messages::UNEXPECTED_ERROR)
            }
        }
    }

    /// Logs the error and renders its body in `format`.
    pub fn render(self, format: MediaFormat) -> Response {
        match &self {
            AppError::InternalServerError(cause) => {
                tracing::error!("Internal server error: {}", cause);
            }
            AppError::Validation(e) => tracing::info!("Validation error: {:?}", e),
            other => tracing::info!("{}", other),
        }

        self.to_body().render(format)
    }
}

/// Rendered with the default format. Use [`AppError::render`] when the
/// client's negotiated format is known.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(MediaFormat::default())
    }
}

/// Flattens field errors into sorted `"<field>: <message>"` entries.
///
/// The error's message is used when present, its code otherwise.
pub fn validation_details(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let text = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, text)
            })
        })
        .collect();

    details.sort();
    details
}
