//! Series definitions
//!
//! A series declares its fields (addressed by the query planner), its tag
//! families (addressed positionally by writes), the ordered entity tags
//! that identify one logical stream, the reserved trace fields and the
//! shard count used for placement.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Group and name of a registered resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    pub group: String,
    pub name: String,
}

impl Metadata {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

/// Declared value type of a field or tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Int,
    StringArray,
    IntArray,
    Binary,
}

impl FieldType {
    /// Returns the type name used in output and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::StringArray => "string_array",
            FieldType::IntArray => "int_array",
            FieldType::Binary => "binary",
        }
    }
}

/// A declared field of a series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Int)
    }
}

/// A declared tag inside a tag family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: FieldType,
}

impl TagSpec {
    pub fn new(name: impl Into<String>, tag_type: FieldType) -> Self {
        Self {
            name: name.into(),
            tag_type,
        }
    }
}

/// Ordered group of tags; write payloads mirror this order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFamilySpec {
    pub name: String,
    pub tags: Vec<TagSpec>,
}

impl TagFamilySpec {
    pub fn new(name: impl Into<String>, tags: Vec<TagSpec>) -> Self {
        Self {
            name: name.into(),
            tags,
        }
    }
}

/// Ordered tag names whose values identify one series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub tag_names: Vec<String>,
}

/// Field carrying the trace state and the values that mark it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStateMap {
    pub field: String,
    #[serde(default)]
    pub val_success: String,
    #[serde(default)]
    pub val_error: String,
}

/// Reserved field names carrying trace identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedFieldsMap {
    pub trace_id: String,
    #[serde(default)]
    pub series_id: Vec<String>,
    pub state: TraceStateMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardInfo {
    pub number: u32,
}

/// Complete series definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub metadata: Metadata,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub tag_families: Vec<TagFamilySpec>,
    #[serde(default)]
    pub entity: EntitySpec,
    pub reserved_fields_map: ReservedFieldsMap,
    pub shard: ShardInfo,
}

impl Series {
    /// Validates the definition itself (not a write against it)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.shard.number == 0 {
            return Err("shard number must be greater than zero".into());
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(format!("field '{}' is declared more than once", field.name));
            }
        }

        if self.reserved_fields_map.trace_id.is_empty() {
            return Err("reserved trace_id field name must not be empty".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_series() -> Series {
        Series {
            metadata: Metadata::new("default", "sw"),
            fields: vec![FieldSpec::string("trace_id"), FieldSpec::int("state")],
            tag_families: vec![],
            entity: EntitySpec::default(),
            reserved_fields_map: ReservedFieldsMap {
                trace_id: "trace_id".into(),
                series_id: vec![],
                state: TraceStateMap {
                    field: "state".into(),
                    val_success: "0".into(),
                    val_error: "1".into(),
                },
            },
            shard: ShardInfo { number: 2 },
        }
    }

    #[test]
    fn test_valid_structure() {
        assert!(sample_series().validate_structure().is_ok());
    }

    #[test]
    fn test_zero_shards_rejected() {
        let mut series = sample_series();
        series.shard.number = 0;
        let err = series.validate_structure().unwrap_err();
        assert!(err.contains("shard"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut series = sample_series();
        series.fields.push(FieldSpec::int("state"));
        let err = series.validate_structure().unwrap_err();
        assert!(err.contains("state"));
    }

    #[test]
    fn test_deserialize_from_json() {
        let series: Series = serde_json::from_value(json!({
            "metadata": { "group": "default", "name": "sw" },
            "fields": [
                { "name": "trace_id", "type": "string" },
                { "name": "duration", "type": "int" }
            ],
            "reserved_fields_map": {
                "trace_id": "trace_id",
                "state": { "field": "state" }
            },
            "shard": { "number": 4 }
        }))
        .unwrap();

        assert_eq!(series.fields[1].field_type, FieldType::Int);
        assert_eq!(series.shard.number, 4);
        assert!(series.tag_families.is_empty());
        assert!(series.entity.tag_names.is_empty());
    }
}
