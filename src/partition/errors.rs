//! Partition error types
//!
//! Malformed-element errors are attributable to the write: the payload
//! does not have the shape the series' entity declares. Codec errors are
//! forwarded as they arrive.

use thiserror::Error;

use crate::codec::CodecError;

/// Context attached when the tag family offset is out of range
pub const MALFORMED_FAMILY_OFFSET: &str = "tag family offset is invalid";

/// Context attached when the tag offset is out of range
pub const MALFORMED_TAG_OFFSET: &str = "tag offset is invalid";

/// Result type for partition operations
pub type PartitionResult<T> = Result<T, PartitionError>;

/// Entity location and shard routing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// Write payload does not match the declared entity positions
    #[error("element is malformed: {0}")]
    MalformedElement(&'static str),

    /// Canonical marshaling failed
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Routing asked for zero shards
    #[error("shard number must be greater than zero")]
    InvalidShardNumber,

    /// Entity names a tag absent from every tag family
    #[error("entity tag '{0}' is not defined in any tag family")]
    EntityTagNotDefined(String),
}

impl PartitionError {
    /// Returns true for malformed-element errors
    pub fn is_malformed(&self) -> bool {
        matches!(self, PartitionError::MalformedElement(_))
    }

    /// Returns the context of a malformed-element error
    pub fn malformed_context(&self) -> Option<&'static str> {
        match self {
            PartitionError::MalformedElement(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PartitionError::MalformedElement(_) => "SDB_MALFORMED_ELEMENT",
            PartitionError::Codec(_) => "SDB_CODEC_FAILED",
            PartitionError::InvalidShardNumber => "SDB_INVALID_SHARD_NUMBER",
            PartitionError::EntityTagNotDefined(_) => "SDB_ENTITY_TAG_NOT_DEFINED",
        }
    }
}
