//! Reviews
//!
//! Course reviews by enrolled students and the rating aggregate derived from them.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::ReviewsServiceError;
pub use service::*;
