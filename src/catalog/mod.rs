//! Series catalog
//!
//! Loads series and index-rule definitions and builds, once per series,
//! the schema view and entity locator the write and query paths share.

mod errors;
mod loader;

pub use errors::{CatalogError, CatalogResult};
pub use loader::{Catalog, CatalogEntry};
