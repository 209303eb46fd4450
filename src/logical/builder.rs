//! Schema build phase
//!
//! The builder owns the field mapping exclusively while fields are
//! registered. `build` hands it to an immutable view; nothing can be
//! registered afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::model::{FieldSpec, IndexRule, Series};

use super::field::FieldDescriptor;
use super::schema::TraceSchema;

/// Accumulates field registrations for one series
#[derive(Debug)]
pub struct SchemaBuilder {
    series: Arc<Series>,
    index_rule: Arc<IndexRule>,
    field_map: HashMap<String, Arc<FieldDescriptor>>,
}

impl SchemaBuilder {
    pub fn new(series: Arc<Series>, index_rule: Arc<IndexRule>) -> Self {
        Self {
            series,
            index_rule,
            field_map: HashMap::new(),
        }
    }

    /// Registers a field at the given position.
    ///
    /// A second registration under the same name replaces the first.
    pub fn register_field(&mut self, name: impl Into<String>, idx: usize, spec: Arc<FieldSpec>) -> &mut Self {
        self.field_map
            .insert(name.into(), Arc::new(FieldDescriptor::new(idx, spec)));
        self
    }

    pub fn build(self) -> TraceSchema {
        debug!(
            series = %self.series.metadata.name,
            fields = self.field_map.len(),
            index_objects = self.index_rule.objects.len(),
            "SCHEMA_BUILT"
        );
        TraceSchema::from_parts(self.series, self.index_rule, self.field_map)
    }
}
