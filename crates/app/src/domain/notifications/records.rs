//! Notification Records

use jiff::Timestamp;
use lectern::notifications::NotificationKind;
use serde::Serialize;

use crate::{
    domain::{
        catalog::records::TeacherUuid,
        orders::records::{OrderItemUuid, OrderUuid},
        reviews::records::ReviewUuid,
        users::UserUuid,
    },
    uuids::TypedUuid,
};

/// Notification UUID
pub type NotificationUuid = TypedUuid<NotificationRecord>;

/// Notification Record
///
/// Addressed to a student through `user_uuid` or to a teacher through `teacher_uuid`.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub uuid: NotificationUuid,
    pub user_uuid: Option<UserUuid>,
    pub teacher_uuid: Option<TeacherUuid>,
    pub order_uuid: Option<OrderUuid>,
    pub order_item_uuid: Option<OrderItemUuid>,
    pub review_uuid: Option<ReviewUuid>,
    pub kind: NotificationKind,
    pub seen: bool,
    pub created_at: Timestamp,
}
