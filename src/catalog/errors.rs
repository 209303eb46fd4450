//! Catalog error types

use thiserror::Error;

use crate::partition::PartitionError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in '{path}': {reason}")]
    InvalidJson { path: String, reason: String },

    #[error("invalid series '{name}': {reason}")]
    InvalidSeries { name: String, reason: String },

    #[error("series '{0}' is already registered")]
    Duplicate(String),

    #[error("index rule '{group}/{name}' in '{path}' is already defined")]
    DuplicateIndexRule {
        group: String,
        name: String,
        path: String,
    },

    #[error("series '{0}' is not registered")]
    UnknownSeries(String),

    #[error("series '{name}': {source}")]
    Partition {
        name: String,
        #[source]
        source: PartitionError,
    },
}

impl CatalogError {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::Io { .. } => "SDB_CATALOG_IO",
            CatalogError::InvalidJson { .. } => "SDB_CATALOG_INVALID_JSON",
            CatalogError::InvalidSeries { .. } => "SDB_CATALOG_INVALID_SERIES",
            CatalogError::Duplicate(_) => "SDB_CATALOG_DUPLICATE",
            CatalogError::DuplicateIndexRule { .. } => "SDB_CATALOG_DUPLICATE_INDEX_RULE",
            CatalogError::UnknownSeries(_) => "SDB_UNKNOWN_SERIES",
            CatalogError::Partition { .. } => "SDB_CATALOG_INVALID_ENTITY",
        }
    }
}
