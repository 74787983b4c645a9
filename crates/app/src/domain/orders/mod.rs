//! Orders
//!
//! Checkout of a student's cart into an order, and the order's payment status.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
