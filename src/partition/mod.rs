//! Entity location and shard placement
//!
//! Extracts the ordered entity tag values from a write, canonicalizes
//! them and routes the result to a shard. Placement must agree on every
//! node, so everything here is deterministic and free of local state.

mod entity;
mod errors;
mod shard;

pub use entity::{get_tag_by_offset, Entity, EntityLocator, TagLocator};
pub use errors::{PartitionError, PartitionResult, MALFORMED_FAMILY_OFFSET, MALFORMED_TAG_OFFSET};
pub use shard::{shard_id, ShardId};
