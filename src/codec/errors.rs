//! Codec error types

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Canonical marshaling errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Value kind has no canonical index representation
    #[error("unsupported tag value for index field: {0}")]
    UnsupportedTagValue(&'static str),
}
