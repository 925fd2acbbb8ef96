//! Media-type negotiation.
//!
//! Every representation the API exchanges travels in one of three formats,
//! selected per request:
//!
//! | Media type           | Format                 |
//! |----------------------|------------------------|
//! | `application/json`   | [`MediaFormat::Json`]  |
//! | `application/xml`    | [`MediaFormat::Xml`]   |
//! | `application/x-yaml` | [`MediaFormat::Yaml`]  |
//!
//! Matching is exact on the type/subtype pair. Parameters such as
//! `charset=utf-8` are ignored, wildcards and quality values are not
//! interpreted. An absent `Accept` header selects JSON.

pub mod codec;
pub mod response;

pub use codec::{CodecError, Representation, decode, encode};
pub use response::Negotiated;

use crate::errors::AppError;
use axum::http::{HeaderMap, header};
use std::fmt;

/// `application/x-yaml`, the YAML media type the API registers
pub const APPLICATION_YAML: &str = "application/x-yaml";

/// Wire format of a request or response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    #[default]
    Json,
    Xml,
    Yaml,
}

impl MediaFormat {
    /// Registered formats, in the order they are listed to clients
    pub const ALL: [MediaFormat; 3] = [MediaFormat::Json, MediaFormat::Xml, MediaFormat::Yaml];

    pub fn mime(self) -> &'static str {
        match self {
            MediaFormat::Json => "application/json",
            MediaFormat::Xml => "application/xml",
            MediaFormat::Yaml => APPLICATION_YAML,
        }
    }

    /// Resolves a single media type, ignoring parameters and case.
    pub fn from_mime(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or_default().trim();

        Self::ALL
            .into_iter()
            .find(|format| format.mime().eq_ignore_ascii_case(essence))
    }

    /// Comma-separated list of the registered media types.
    pub fn supported() -> String {
        Self::ALL.map(MediaFormat::mime).join(", ")
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Selects the response format from the `Accept` header.
///
/// The first listed media type that is registered wins. An absent or blank
/// header selects the default format.
///
/// # Errors
/// [`AppError::NotAcceptable`] when no listed media type is registered.
pub fn response_format(headers: &HeaderMap) -> Result<MediaFormat, AppError> {
    let mut requested = Vec::new();

    for value in headers.get_all(header::ACCEPT) {
        let value = value
            .to_str()
            .map_err(|_| AppError::NotAcceptable("<non-ASCII>".to_string()))?;
        requested.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty()),
        );
    }

    if requested.is_empty() {
        return Ok(MediaFormat::default());
    }

    requested
        .iter()
        .find_map(|entry| MediaFormat::from_mime(entry))
        .ok_or_else(|| AppError::NotAcceptable(requested.join(", ")))
}

/// Selects the request body format from the `Content-Type` header.
///
/// # Errors
/// [`AppError::UnsupportedMediaType`] when the header is missing or names an
/// unregistered media type.
pub fn request_format(headers: &HeaderMap) -> Result<MediaFormat, AppError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Err(AppError::UnsupportedMediaType("<missing>".to_string()));
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::UnsupportedMediaType("<non-ASCII>".to_string()))?;

    MediaFormat::from_mime(value).ok_or_else(|| AppError::UnsupportedMediaType(value.to_string()))
}
