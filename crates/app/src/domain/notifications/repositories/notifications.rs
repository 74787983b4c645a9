//! Notifications Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::records::TeacherUuid,
    columns::{try_get_optional_uuid, try_get_parsed, try_get_timestamp, try_get_uuid},
    notifications::{
        data::NewNotification,
        records::{NotificationRecord, NotificationUuid},
    },
    orders::records::{OrderItemUuid, OrderUuid},
    reviews::records::ReviewUuid,
    users::UserUuid,
};

const CREATE_NOTIFICATION_SQL: &str = include_str!("../sql/create_notification.sql");
const LIST_USER_NOTIFICATIONS_SQL: &str = include_str!("../sql/list_user_notifications.sql");
const LIST_TEACHER_NOTIFICATIONS_SQL: &str =
    include_str!("../sql/list_teacher_notifications.sql");
const MARK_NOTIFICATION_SEEN_SQL: &str = include_str!("../sql/mark_notification_seen.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgNotificationsRepository;

impl PgNotificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_notification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NewNotification,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(CREATE_NOTIFICATION_SQL)
            .bind(notification.uuid.into_uuid())
            .bind(notification.user_uuid.map(UserUuid::into_uuid))
            .bind(notification.teacher_uuid.map(TeacherUuid::into_uuid))
            .bind(notification.order_uuid.map(OrderUuid::into_uuid))
            .bind(notification.order_item_uuid.map(OrderItemUuid::into_uuid))
            .bind(notification.review_uuid.map(ReviewUuid::into_uuid))
            .bind(notification.kind.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_USER_NOTIFICATIONS_SQL)
            .bind(user.into_uuid())
            .bind(unseen_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_for_teacher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        teacher: TeacherUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(LIST_TEACHER_NOTIFICATIONS_SQL)
            .bind(teacher.into_uuid())
            .bind(unseen_only)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn mark_seen(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, sqlx::Error> {
        query_as::<Postgres, NotificationRecord>(MARK_NOTIFICATION_SEEN_SQL)
            .bind(notification.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for NotificationRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            user_uuid: try_get_optional_uuid(row, "user_uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            order_uuid: try_get_optional_uuid(row, "order_uuid")?,
            order_item_uuid: try_get_optional_uuid(row, "order_item_uuid")?,
            review_uuid: try_get_optional_uuid(row, "review_uuid")?,
            kind: try_get_parsed(row, "kind")?,
            seen: row.try_get("seen")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
