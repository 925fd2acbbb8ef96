//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with an [`ErrorBody`](crate::errors::ErrorBody)
//! already rendered for the client, so handlers only see valid input.

pub mod accepts;
pub mod id_path;
pub mod validated_body;

pub use accepts::Accepts;
pub use id_path::IdPath;
pub use validated_body::ValidatedBody;
