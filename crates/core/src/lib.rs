//! Lectern
//!
//! Lectern is the pricing and order-lifecycle engine behind the course marketplace: cart
//! line pricing, order totals, coupon redemption, payment status transitions, enrollment
//! fan-out planning and course rating aggregates. It performs no I/O.

pub mod catalog;
pub mod coupons;
pub mod enrollments;
pub mod money;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod pricing;
pub mod reviews;
