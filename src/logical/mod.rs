//! Logical schema layer for query planning
//!
//! # Design Principles
//!
//! - Schema views are built once, then read-only
//! - Projection allocates a new view; the receiver never changes
//! - Series and index-rule definitions are shared, never copied
//! - Equality is defined over the field mapping alone

mod builder;
mod errors;
mod field;
mod schema;

pub use builder::SchemaBuilder;
pub use errors::{LogicalError, LogicalErrorCode, LogicalResult, Severity};
pub use field::{FieldDescriptor, FieldRef};
pub use schema::{Schema, TraceSchema};
