//! Schema views for query planning
//!
//! A schema view answers which fields exist and which are indexed, hands
//! out field references, and projects itself into narrower views. Views
//! are immutable once built and are shared freely across threads.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::model::{IndexObject, IndexRule, Series};

use super::builder::SchemaBuilder;
use super::errors::{LogicalError, LogicalResult};
use super::field::{FieldDescriptor, FieldRef};

/// Read-only schema capability used by the planner
pub trait Schema: fmt::Debug + Send + Sync {
    /// Returns the first index object, in rule order, covering the field.
    fn index_defined(&self, field: &str) -> Option<&IndexObject>;

    /// Returns the position within the index rule of the first index
    /// object covering the field. This is the rule entry's offset, not
    /// the field's descriptor index.
    fn field_subscript(&self, field: &str) -> Option<usize>;

    /// Returns true if the field is registered in this view.
    fn field_defined(&self, field: &str) -> bool;

    /// Resolves each name to a reference, in request order.
    ///
    /// Fails on the first unknown name.
    fn create_ref(&self, names: &[&str]) -> LogicalResult<Vec<FieldRef>>;

    /// Builds a new view registering exactly the given references.
    ///
    /// Returns `None` when no references are given.
    fn map(&self, refs: &[FieldRef]) -> Option<Box<dyn Schema>>;

    /// Structural equality over the field mapping only.
    fn equal(&self, other: &dyn Schema) -> bool;

    fn shard_number(&self) -> u32;

    fn trace_id_field_name(&self) -> &str;

    fn trace_state_field_name(&self) -> &str;

    fn as_any(&self) -> &dyn Any;
}

/// Map-backed schema view over one series and its index rule
#[derive(Debug, Clone)]
pub struct TraceSchema {
    series: Arc<Series>,
    index_rule: Arc<IndexRule>,
    field_map: HashMap<String, Arc<FieldDescriptor>>,
}

impl TraceSchema {
    pub(super) fn from_parts(
        series: Arc<Series>,
        index_rule: Arc<IndexRule>,
        field_map: HashMap<String, Arc<FieldDescriptor>>,
    ) -> Self {
        Self {
            series,
            index_rule,
            field_map,
        }
    }

    /// Builds a view registering every declared field of the series at
    /// its declaration position.
    pub fn from_series(series: Arc<Series>, index_rule: Arc<IndexRule>) -> Self {
        let fields = series.fields.clone();
        let mut builder = SchemaBuilder::new(series, index_rule);
        for (i, spec) in fields.into_iter().enumerate() {
            let name = spec.name.clone();
            builder.register_field(name, i, Arc::new(spec));
        }
        builder.build()
    }

    pub fn series(&self) -> &Arc<Series> {
        &self.series
    }

    pub fn index_rule(&self) -> &Arc<IndexRule> {
        &self.index_rule
    }

    /// Registered field names, sorted
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.field_map.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn field_count(&self) -> usize {
        self.field_map.len()
    }

    /// Returns the descriptor registered under the name
    pub fn descriptor(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.field_map.get(name)
    }

    /// Concrete projection; see [`Schema::map`].
    pub fn project(&self, refs: &[FieldRef]) -> Option<TraceSchema> {
        if refs.is_empty() {
            return None;
        }
        let field_map = refs
            .iter()
            .map(|r| (r.name().to_string(), Arc::clone(r.spec())))
            .collect();
        debug!(
            series = %self.series.metadata.name,
            fields = refs.len(),
            "SCHEMA_PROJECTED"
        );
        Some(Self {
            series: Arc::clone(&self.series),
            index_rule: Arc::clone(&self.index_rule),
            field_map,
        })
    }
}

impl Schema for TraceSchema {
    fn index_defined(&self, field: &str) -> Option<&IndexObject> {
        self.index_rule.objects.iter().find(|obj| obj.covers(field))
    }

    fn field_subscript(&self, field: &str) -> Option<usize> {
        self.index_rule.objects.iter().position(|obj| obj.covers(field))
    }

    fn field_defined(&self, field: &str) -> bool {
        self.field_map.contains_key(field)
    }

    fn create_ref(&self, names: &[&str]) -> LogicalResult<Vec<FieldRef>> {
        names
            .iter()
            .map(|&name| {
                self.field_map
                    .get(name)
                    .map(|spec| FieldRef::new(name, Arc::clone(spec)))
                    .ok_or_else(|| LogicalError::field_not_defined(name))
            })
            .collect()
    }

    fn map(&self, refs: &[FieldRef]) -> Option<Box<dyn Schema>> {
        self.project(refs).map(|s| Box::new(s) as Box<dyn Schema>)
    }

    fn equal(&self, other: &dyn Schema) -> bool {
        match other.as_any().downcast_ref::<TraceSchema>() {
            Some(other) => self.field_map == other.field_map,
            None => false,
        }
    }

    fn shard_number(&self) -> u32 {
        self.series.shard.number
    }

    fn trace_id_field_name(&self) -> &str {
        &self.series.reserved_fields_map.trace_id
    }

    fn trace_state_field_name(&self) -> &str {
        &self.series.reserved_fields_map.state.field
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        EntitySpec, FieldSpec, FieldType, IndexType, Metadata, ReservedFieldsMap, ShardInfo,
        TraceStateMap,
    };

    fn sample_series(shards: u32) -> Arc<Series> {
        Arc::new(Series {
            metadata: Metadata::new("default", "sw"),
            fields: vec![
                FieldSpec::string("trace_id"),
                FieldSpec::int("state"),
                FieldSpec::string("service_id"),
                FieldSpec::int("duration"),
                FieldSpec::int("start_time"),
            ],
            tag_families: vec![],
            entity: EntitySpec::default(),
            reserved_fields_map: ReservedFieldsMap {
                trace_id: "trace_id".into(),
                series_id: vec!["service_id".into()],
                state: TraceStateMap {
                    field: "state".into(),
                    val_success: "0".into(),
                    val_error: "1".into(),
                },
            },
            shard: ShardInfo { number: shards },
        })
    }

    fn sample_rule() -> Arc<IndexRule> {
        Arc::new(IndexRule::new(
            Metadata::new("default", "sw"),
            vec![
                IndexObject::new("trace_id", vec!["trace_id".into()], IndexType::Id),
                IndexObject::new(
                    "svc_op",
                    vec!["service_id".into(), "operation".into()],
                    IndexType::Text,
                ),
                IndexObject::new("duration", vec!["duration".into()], IndexType::Numerical),
            ],
        ))
    }

    fn sample_schema() -> TraceSchema {
        TraceSchema::from_series(sample_series(2), sample_rule())
    }

    #[test]
    fn test_from_series_registers_declared_positions() {
        let schema = sample_schema();
        assert_eq!(schema.field_count(), 5);
        let refs = schema.create_ref(&["duration"]).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].idx(), 3);
        assert_eq!(refs[0].field_type(), FieldType::Int);
    }

    #[test]
    fn test_create_ref_preserves_request_order() {
        let schema = sample_schema();
        let refs = schema.create_ref(&["start_time", "trace_id", "duration"]).unwrap();
        let names: Vec<&str> = refs.iter().map(FieldRef::name).collect();
        assert_eq!(names, vec!["start_time", "trace_id", "duration"]);
    }

    #[test]
    fn test_create_ref_unknown_field() {
        let schema = sample_schema();
        let err = schema.create_ref(&["trace_id", "unregistered"]).unwrap_err();
        assert_eq!(err.context(), "unregistered");
    }

    #[test]
    fn test_index_defined_first_match() {
        let schema = sample_schema();
        let obj = schema.index_defined("operation").unwrap();
        assert_eq!(obj.name, "svc_op");
        assert!(schema.index_defined("start_time").is_none());
    }

    #[test]
    fn test_index_defined_for_unregistered_field() {
        // "operation" is indexed but not a registered field
        let schema = sample_schema();
        assert!(!schema.field_defined("operation"));
        assert!(schema.index_defined("operation").is_some());
    }

    #[test]
    fn test_field_subscript_is_rule_position() {
        let schema = sample_schema();
        assert_eq!(schema.field_subscript("trace_id"), Some(0));
        assert_eq!(schema.field_subscript("service_id"), Some(1));
        // descriptor index of duration is 3, rule position is 2
        assert_eq!(schema.field_subscript("duration"), Some(2));
        assert_eq!(schema.field_subscript("start_time"), None);
    }

    #[test]
    fn test_map_narrows_fields() {
        let schema = sample_schema();
        let refs = schema.create_ref(&["trace_id", "duration"]).unwrap();
        let projected = schema.map(&refs).unwrap();

        assert!(projected.field_defined("trace_id"));
        assert!(projected.field_defined("duration"));
        assert!(!projected.field_defined("service_id"));
        assert!(!projected.field_defined("state"));

        // receiver untouched
        assert!(schema.field_defined("service_id"));
    }

    #[test]
    fn test_map_keeps_descriptors() {
        let schema = sample_schema();
        let refs = schema.create_ref(&["duration"]).unwrap();
        let projected = schema.map(&refs).unwrap();
        let again = projected.create_ref(&["duration"]).unwrap();
        assert_eq!(again[0].idx(), 3);
    }

    #[test]
    fn test_map_empty_is_none() {
        let schema = sample_schema();
        assert!(schema.map(&[]).is_none());
    }

    #[test]
    fn test_map_shares_definitions() {
        let schema = sample_schema();
        let refs = schema.create_ref(&["trace_id"]).unwrap();
        let projected = schema.project(&refs).unwrap();
        assert!(Arc::ptr_eq(projected.series(), schema.series()));
        assert!(Arc::ptr_eq(projected.index_rule(), schema.index_rule()));
    }

    #[test]
    fn test_shard_number_survives_projection() {
        let schema = TraceSchema::from_series(sample_series(16), sample_rule());
        let refs = schema.create_ref(&["trace_id"]).unwrap();
        let projected = schema.map(&refs).unwrap();
        assert_eq!(schema.shard_number(), 16);
        assert_eq!(projected.shard_number(), 16);
    }

    #[test]
    fn test_equal_self() {
        let schema = sample_schema();
        assert!(schema.equal(&schema));
    }

    #[test]
    fn test_equal_ignores_definitions() {
        let a = TraceSchema::from_series(sample_series(2), sample_rule());
        let b = TraceSchema::from_series(
            sample_series(8),
            Arc::new(IndexRule::empty(Metadata::new("other", "other"))),
        );
        assert!(a.equal(&b));
    }

    #[test]
    fn test_projection_not_equal_to_base() {
        let schema = sample_schema();
        let refs = schema.create_ref(&["trace_id"]).unwrap();
        let projected = schema.map(&refs).unwrap();
        assert!(!schema.equal(&*projected));
        assert!(!projected.equal(&schema));
    }

    #[test]
    fn test_reserved_field_names() {
        let schema = sample_schema();
        assert_eq!(schema.trace_id_field_name(), "trace_id");
        assert_eq!(schema.trace_state_field_name(), "state");
    }

    #[test]
    fn test_field_names_sorted() {
        let schema = sample_schema();
        assert_eq!(
            schema.field_names(),
            vec!["duration", "service_id", "start_time", "state", "trace_id"]
        );
    }
}
