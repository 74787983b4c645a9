//! Coupon Data

use crate::domain::{catalog::records::TeacherUuid, coupons::records::CouponUuid};

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub uuid: CouponUuid,
    pub teacher_uuid: Option<TeacherUuid>,
    pub code: String,
    pub discount: u32,
    pub active: bool,
}
