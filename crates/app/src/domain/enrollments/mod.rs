//! Enrollments
//!
//! Payment confirmation and the enrollments and notifications it fans out to.

pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::EnrollmentsServiceError;
pub use service::*;
