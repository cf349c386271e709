//! Request-side models for storefront pages.

pub mod catalog_query;

pub use catalog_query::{CatalogQuery, safe_return_path};
