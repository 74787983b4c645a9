//! Catalog
//!
//! Teachers, categories, courses with their curriculum, and the countries whose tax
//! rates price cart lines.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
