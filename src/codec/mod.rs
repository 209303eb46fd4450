//! Canonical marshaling of tag values
//!
//! Converts a tag value into the fixed byte form used both as an index
//! key and as an entity component. The encoding is stable across
//! processes: shard placement depends on it.

mod errors;
mod value;

pub use errors::{CodecError, CodecResult};
pub use value::marshal_tag_value;
