//! Definition types consumed by the schema and partition layers
//!
//! These are the series, index-rule and write-payload shapes that arrive
//! from the metadata registry and from clients. The core never mutates
//! them; shared definitions are held behind `Arc` so projections and
//! locators can point at the same data.

mod index_rule;
mod series;
mod write;

pub use index_rule::{IndexObject, IndexRule, IndexType};
pub use series::{
    EntitySpec, FieldSpec, FieldType, Metadata, ReservedFieldsMap, Series, ShardInfo, TagFamilySpec,
    TagSpec, TraceStateMap,
};
pub use write::{TagFamilyForWrite, TagValue, WriteRequest};
