//! Catalog of series definitions
//!
//! Definitions live on disk as one JSON file per resource:
//! - `<dir>/series/*.json`: one `Series` each
//! - `<dir>/index_rules/*.json`: one `IndexRule` each
//!
//! Rules are joined to series by metadata. A series without a rule gets
//! an empty one. Each registered series gets its schema view and entity
//! locator built once, here.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::logical::TraceSchema;
use crate::model::{IndexRule, Metadata, Series};
use crate::partition::EntityLocator;

use super::errors::{CatalogError, CatalogResult};

const SERIES_DIR: &str = "series";
const INDEX_RULE_DIR: &str = "index_rules";

/// Everything derived from one series definition
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub series: Arc<Series>,
    pub schema: Arc<TraceSchema>,
    pub locator: EntityLocator,
}

impl CatalogEntry {
    pub fn shard_number(&self) -> u32 {
        self.series.shard.number
    }
}

/// In-memory registry of series keyed by name
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every series and index rule under `dir`.
    ///
    /// Any unreadable or invalid file fails the whole load, and so do two
    /// index rules with the same metadata.
    pub fn load(dir: &Path) -> CatalogResult<Self> {
        let mut rules: HashMap<Metadata, IndexRule> = HashMap::new();
        for path in json_files(&dir.join(INDEX_RULE_DIR))? {
            let rule: IndexRule = read_json(&path)?;
            match rules.entry(rule.metadata.clone()) {
                Entry::Occupied(slot) => {
                    let metadata = slot.key();
                    warn!(path = %path.display(), name = %metadata.name, "INDEX_RULE_DUPLICATE");
                    return Err(CatalogError::DuplicateIndexRule {
                        group: metadata.group.clone(),
                        name: metadata.name.clone(),
                        path: path.display().to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(rule);
                }
            }
        }

        let mut catalog = Self::new();
        for path in json_files(&dir.join(SERIES_DIR))? {
            let series: Series = read_json(&path)?;
            let rule = rules
                .remove(&series.metadata)
                .unwrap_or_else(|| IndexRule::empty(series.metadata.clone()));
            if let Err(e) = catalog.register(series, rule) {
                warn!(path = %path.display(), error = %e, "SERIES_REJECTED");
                return Err(e);
            }
        }

        for metadata in rules.keys() {
            warn!(group = %metadata.group, name = %metadata.name, "INDEX_RULE_UNMATCHED");
        }

        info!(
            dir = %dir.display(),
            series = catalog.len(),
            "CATALOG_LOADED"
        );
        Ok(catalog)
    }

    /// Registers a series with its index rule.
    pub fn register(&mut self, series: Series, index_rule: IndexRule) -> CatalogResult<&CatalogEntry> {
        let name = series.metadata.name.clone();

        series
            .validate_structure()
            .map_err(|reason| CatalogError::InvalidSeries {
                name: name.clone(),
                reason,
            })?;

        if self.entries.contains_key(&name) {
            return Err(CatalogError::Duplicate(name));
        }

        let locator = EntityLocator::from_spec(&series.tag_families, &series.entity).map_err(
            |source| CatalogError::Partition {
                name: name.clone(),
                source,
            },
        )?;

        let series = Arc::new(series);
        let schema = TraceSchema::from_series(Arc::clone(&series), Arc::new(index_rule));
        let entry = CatalogEntry {
            series,
            schema: Arc::new(schema),
            locator,
        };

        Ok(self.entries.entry(name).or_insert(entry))
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    /// Like `get`, but unknown names are an error
    pub fn entry(&self, name: &str) -> CatalogResult<&CatalogEntry> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownSeries(name.to_string()))
    }

    /// Registered series names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lists `*.json` files in a directory, sorted. A missing directory is empty.
fn json_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CatalogResult<T> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| CatalogError::InvalidJson {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
