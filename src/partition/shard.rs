//! Shard routing
//!
//! Placement is `xxh64(key, seed 0) % shard_num`. The hash is stable
//! across processes and platforms, so every node places the same entity
//! on the same shard for a given shard count.

use std::fmt;

use xxhash_rust::xxh64::xxh64;

use super::errors::{PartitionError, PartitionResult};

/// Identifier of a physical shard, `0 <= id < shard_num`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShardId(pub u32);

impl ShardId {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ShardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps entity bytes to a shard.
pub fn shard_id(key: &[u8], shard_num: u32) -> PartitionResult<ShardId> {
    if shard_num == 0 {
        return Err(PartitionError::InvalidShardNumber);
    }
    let hash = xxh64(key, 0);
    // result < shard_num <= u32::MAX
    Ok(ShardId((hash % u64::from(shard_num)) as u32))
}
