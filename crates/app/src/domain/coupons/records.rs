//! Coupon Records

use jiff::Timestamp;
use lectern::coupons::CouponTerms;
use serde::Serialize;

use crate::{domain::catalog::records::TeacherUuid, uuids::TypedUuid};

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone, Serialize)]
pub struct CouponRecord {
    pub uuid: CouponUuid,

    /// Restricts the coupon to this teacher's courses.
    pub teacher_uuid: Option<TeacherUuid>,
    pub code: String,

    /// Percentage taken off the item price.
    pub discount: u32,
    pub active: bool,
    pub created_at: Timestamp,
}

impl CouponRecord {
    #[must_use]
    pub fn terms(&self) -> CouponTerms {
        CouponTerms {
            discount: self.discount,
            active: self.active,
        }
    }

    /// Whether the coupon may discount a course sold by `teacher`.
    #[must_use]
    pub fn covers(&self, teacher: Option<TeacherUuid>) -> bool {
        self.teacher_uuid.is_none_or(|owner| teacher == Some(owner))
    }
}
