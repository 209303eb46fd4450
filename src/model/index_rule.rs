//! Index rule definitions
//!
//! An index rule is an ordered list of index objects. Each object covers
//! one or more field names. The rule is independent of the field mapping
//! of a schema view: a field can be indexed without being registered, and
//! projections routinely register fewer fields than the rule covers.

use serde::{Deserialize, Serialize};

use super::series::Metadata;

/// Kind of secondary index backing an index object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    Text,
    Numerical,
    Id,
}

/// One entry of an index rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexObject {
    pub name: String,
    pub fields: Vec<String>,
    #[serde(rename = "type")]
    pub index_type: IndexType,
}

impl IndexObject {
    pub fn new(name: impl Into<String>, fields: Vec<String>, index_type: IndexType) -> Self {
        Self {
            name: name.into(),
            fields,
            index_type,
        }
    }

    /// Returns true if this object covers the field
    pub fn covers(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Ordered set of index objects for one series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRule {
    pub metadata: Metadata,
    #[serde(default)]
    pub objects: Vec<IndexObject>,
}

impl IndexRule {
    pub fn new(metadata: Metadata, objects: Vec<IndexObject>) -> Self {
        Self { metadata, objects }
    }

    /// Rule with no index objects
    pub fn empty(metadata: Metadata) -> Self {
        Self {
            metadata,
            objects: Vec::new(),
        }
    }
}
