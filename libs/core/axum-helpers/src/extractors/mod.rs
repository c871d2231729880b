//! Custom extractors for Axum handlers.
//!
//! These keep request rejections on the same JSON error contract as
//! every other failure.

mod json;

pub use json::Json;
