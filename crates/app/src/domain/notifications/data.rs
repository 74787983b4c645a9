//! Notification Data

use lectern::notifications::NotificationKind;

use crate::domain::{
    catalog::records::TeacherUuid,
    notifications::records::NotificationUuid,
    orders::records::{OrderItemUuid, OrderUuid},
    reviews::records::ReviewUuid,
    users::UserUuid,
};

/// New Notification Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub uuid: NotificationUuid,
    pub user_uuid: Option<UserUuid>,
    pub teacher_uuid: Option<TeacherUuid>,
    pub order_uuid: Option<OrderUuid>,
    pub order_item_uuid: Option<OrderItemUuid>,
    pub review_uuid: Option<ReviewUuid>,
    pub kind: NotificationKind,
}
