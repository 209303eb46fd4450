//! Tag value marshaling

use crate::model::TagValue;

use super::errors::{CodecError, CodecResult};

/// Marshals a tag value into its canonical bytes.
///
/// - strings: UTF-8 bytes
/// - integers: 8 bytes, big-endian
/// - binary: unchanged
///
/// Null and array values have no single canonical form and are rejected.
pub fn marshal_tag_value(value: &TagValue) -> CodecResult<Vec<u8>> {
    match value {
        TagValue::Str(s) => Ok(s.as_bytes().to_vec()),
        TagValue::Int(i) => Ok(i.to_be_bytes().to_vec()),
        TagValue::BinaryData(b) => Ok(b.clone()),
        other => Err(CodecError::UnsupportedTagValue(other.kind())),
    }
}
