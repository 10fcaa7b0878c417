//! Location catalog implementations.

pub mod static_catalog;

pub use static_catalog::{CatalogData, StaticLocationCatalog};
