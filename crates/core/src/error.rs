//! Error types for the extracto extraction library.

use thiserror::Error;

/// Primary error type for extraction operations.
///
/// Only document-fatal conditions are represented here. Optional stages
/// (section hints, tabular fallback) never produce an error; they resolve to
/// their defined defaults inside the pipeline.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("document text is empty")]
    EmptyDocument,

    #[error("document text too short to process: {len} chars (minimum {min})")]
    TextTooShort { len: usize, min: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;
