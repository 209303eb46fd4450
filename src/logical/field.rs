//! Field descriptors and references
//!
//! A descriptor pairs a field's registered position with its declared
//! spec. A reference is the handle the planner passes around: the field
//! name plus a shared pointer to the descriptor held by the schema view
//! that produced it.

use std::sync::Arc;

use crate::model::{FieldSpec, FieldType};

/// Registered field: position within the schema plus declared spec
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    idx: usize,
    spec: Arc<FieldSpec>,
}

impl FieldDescriptor {
    pub fn new(idx: usize, spec: Arc<FieldSpec>) -> Self {
        Self { idx, spec }
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn field_type(&self) -> FieldType {
        self.spec.field_type
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }
}

// Equal iff position, declared type and declared name all match.
impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
            && self.spec.field_type == other.spec.field_type
            && self.spec.name == other.spec.name
    }
}

impl Eq for FieldDescriptor {}

/// Named handle to a registered field
///
/// Only authoritative for the schema view that created it. After a
/// projection, derive fresh references from the projected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    name: String,
    spec: Arc<FieldDescriptor>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, spec: Arc<FieldDescriptor>) -> Self {
        Self {
            name: name.into(),
            spec,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn spec(&self) -> &Arc<FieldDescriptor> {
        &self.spec
    }

    pub fn idx(&self) -> usize {
        self.spec.idx()
    }

    pub fn field_type(&self) -> FieldType {
        self.spec.field_type()
    }
}
