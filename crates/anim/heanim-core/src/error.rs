//! Error taxonomy for the codec and conversion utilities.
//!
//! Unknown keyframe-set ordinals and the legacy single-texture UV schema are
//! deliberately NOT errors: both are documented non-fatal skips handled
//! inside the decoder.

use thiserror::Error;

/// Errors from the pure numeric conversion utilities.
#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    /// FOV reprojection requires a positive, finite aspect ratio.
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f64),
    /// Frame-range aggregation over zero clips has no defined result.
    #[error("no clips to aggregate a frame range from")]
    EmptyInput,
}

/// Errors from XML encode/decode. A malformed document never yields a
/// partial result.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl CodecError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        CodecError::Malformed(msg.into())
    }
}
