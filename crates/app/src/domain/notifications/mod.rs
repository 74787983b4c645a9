//! Notifications
//!
//! Stored notifications for students and teachers. Delivery reads these rows.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::NotificationsServiceError;
pub use service::*;
