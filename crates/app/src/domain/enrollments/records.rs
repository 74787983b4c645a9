//! Enrollment Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{
        catalog::records::{CourseUuid, TeacherUuid},
        notifications::records::NotificationRecord,
        orders::records::{OrderItemUuid, OrderRecord},
        users::UserUuid,
    },
    uuids::TypedUuid,
};

/// Enrollment UUID
pub type EnrollmentUuid = TypedUuid<EnrollmentRecord>;

/// Enrollment Record
///
/// At most one per paid order item.
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentRecord {
    pub uuid: EnrollmentUuid,
    pub course_uuid: CourseUuid,
    pub user_uuid: UserUuid,
    pub teacher_uuid: Option<TeacherUuid>,
    pub order_item_uuid: OrderItemUuid,
    pub created_at: Timestamp,
}

/// Result of confirming an order's payment.
///
/// `enrollments` and `notifications` only hold rows created by this confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentConfirmation {
    pub order: OrderRecord,
    pub enrollments: Vec<EnrollmentRecord>,
    pub notifications: Vec<NotificationRecord>,
}
