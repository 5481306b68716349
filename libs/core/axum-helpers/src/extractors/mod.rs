//! Custom extractors for Axum handlers.
//!
//! Both extractors reject with [`crate::AppError`], so malformed input gets the
//! same JSON error body as every other failure.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
