//! Cart Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{catalog::records::CourseUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
///
/// One row per user and course; re-adding a course reprices the existing row.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub user_uuid: UserUuid,
    pub course_uuid: CourseUuid,
    pub price: u64,
    pub tax_fee: u64,
    pub total: u64,

    /// Country name the tax rate was looked up with.
    pub country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Summed amounts across a user's cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartStats {
    pub items: u64,
    pub price: u64,
    pub tax_fee: u64,
    pub total: u64,
}
