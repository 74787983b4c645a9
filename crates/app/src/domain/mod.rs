//! Lectern Domain Concerns

pub mod carts;
pub mod catalog;
pub(crate) mod columns;
pub mod coupons;
pub mod enrollments;
pub mod notifications;
pub mod orders;
pub mod reviews;
pub mod users;
