//! Write payloads
//!
//! A write carries an ordered list of tag families, each an ordered list
//! of typed tag values. Positions mirror the series' `tag_families`
//! declaration; nothing here checks that they actually do.

use serde::{Deserialize, Serialize};

/// A single typed tag value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagValue {
    Null,
    Str(String),
    Int(i64),
    StrArray(Vec<String>),
    IntArray(Vec<i64>),
    BinaryData(Vec<u8>),
}

impl TagValue {
    /// Returns the value kind for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            TagValue::Null => "null",
            TagValue::Str(_) => "str",
            TagValue::Int(_) => "int",
            TagValue::StrArray(_) => "str_array",
            TagValue::IntArray(_) => "int_array",
            TagValue::BinaryData(_) => "binary_data",
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Str(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Str(s)
    }
}

impl From<i64> for TagValue {
    fn from(i: i64) -> Self {
        TagValue::Int(i)
    }
}

/// One tag family of a write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFamilyForWrite {
    pub tags: Vec<TagValue>,
}

impl TagFamilyForWrite {
    pub fn new(tags: Vec<TagValue>) -> Self {
        Self { tags }
    }
}

/// A write addressed to a named series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteRequest {
    pub series: String,
    #[serde(default)]
    pub element_id: Option<String>,
    pub tag_families: Vec<TagFamilyForWrite>,
}
