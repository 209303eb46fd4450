//! seriesdb - schema projection and entity placement for trace series
//!
//! Two pieces sit on the hot path of every write and every query plan:
//!
//! - [`logical`]: schema views that resolve, validate and narrow the fields
//!   a query touches
//! - [`partition`]: entity extraction from writes and deterministic shard
//!   routing
//!
//! [`catalog`] builds both from series definitions once; after that they
//! are read-only and shared across threads.

pub mod catalog;
pub mod cli;
pub mod codec;
pub mod logical;
pub mod model;
pub mod partition;
