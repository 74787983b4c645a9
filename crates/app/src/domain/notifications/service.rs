//! Notifications service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::records::TeacherUuid,
        notifications::{
            errors::NotificationsServiceError,
            records::{NotificationRecord, NotificationUuid},
            repositories::PgNotificationsRepository,
        },
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgNotificationsService {
    db: Db,
    repository: PgNotificationsRepository,
}

impl PgNotificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl NotificationsService for PgNotificationsService {
    async fn list_for_user(
        &self,
        user: UserUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notifications = self
            .repository
            .list_for_user(&mut tx, user, unseen_only)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }

    async fn list_for_teacher(
        &self,
        teacher: TeacherUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let notifications = self
            .repository
            .list_for_teacher(&mut tx, teacher, unseen_only)
            .await?;

        tx.commit().await?;

        Ok(notifications)
    }

    #[tracing::instrument(
        name = "notifications.service.mark_seen",
        skip(self),
        fields(notification_uuid = %notification),
        err
    )]
    async fn mark_seen(
        &self,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.repository.mark_seen(&mut tx, notification).await?;

        tx.commit().await?;

        info!("marked notification seen");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    /// A student's notifications, newest first.
    async fn list_for_user(
        &self,
        user: UserUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    /// A teacher's notifications, newest first.
    async fn list_for_teacher(
        &self,
        teacher: TeacherUuid,
        unseen_only: bool,
    ) -> Result<Vec<NotificationRecord>, NotificationsServiceError>;

    async fn mark_seen(
        &self,
        notification: NotificationUuid,
    ) -> Result<NotificationRecord, NotificationsServiceError>;
}

#[cfg(test)]
mod tests {
    use crate::{domain::notifications::records::NotificationUuid, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn marking_unknown_notification_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.notifications.mark_seen(NotificationUuid::new()).await;

        assert!(
            matches!(result, Err(NotificationsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
