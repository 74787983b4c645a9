//! Enrollments service.

use async_trait::async_trait;
use lectern::{
    enrollments::{FanOut, PaidItem, Recipient, plan_fan_out},
    payments::{Confirmation, PaymentStatus},
};
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        enrollments::{
            errors::EnrollmentsServiceError,
            records::{EnrollmentRecord, PaymentConfirmation},
            repositories::PgEnrollmentsRepository,
        },
        notifications::{
            data::NewNotification, records::NotificationUuid,
            repositories::PgNotificationsRepository,
        },
        orders::{
            records::{OrderItemRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgEnrollmentsService {
    db: Db,
    enrollments_repository: PgEnrollmentsRepository,
    notifications_repository: PgNotificationsRepository,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgEnrollmentsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            enrollments_repository: PgEnrollmentsRepository::new(),
            notifications_repository: PgNotificationsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }
}

#[async_trait]
impl EnrollmentsService for PgEnrollmentsService {
    #[tracing::instrument(
        name = "enrollments.service.confirm_payment",
        skip(self, reference),
        fields(order_uuid = %order),
        err
    )]
    async fn confirm_payment(
        &self,
        order: OrderUuid,
        reference: Option<String>,
    ) -> Result<PaymentConfirmation, EnrollmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let locked = self.orders_repository.lock_order(&mut tx, order).await?;
        let student = locked.student_uuid;

        match locked.payment_status.confirm() {
            Confirmation::Settled => {
                info!(previous = %locked.payment_status, "settling payment");
            }
            Confirmation::AlreadyPaid => {
                debug!("order already paid, re-running fan-out");
            }
        }

        self.orders_repository
            .set_payment_status(&mut tx, order, PaymentStatus::Paid, reference.as_deref())
            .await?;

        let items = self.items_repository.list_order_items(&mut tx, order).await?;
        let enrolled = self
            .enrollments_repository
            .enrolled_items(&mut tx, order)
            .await?;

        let paid: Vec<_> = items
            .iter()
            .map(|item| PaidItem {
                item: item.uuid,
                teacher: item.teacher_uuid,
            })
            .collect();

        let plan = plan_fan_out(&paid, &enrolled);

        let by_uuid: FxHashMap<_, &OrderItemRecord> =
            items.iter().map(|item| (item.uuid, item)).collect();

        let mut enrollments = Vec::with_capacity(plan.enroll.len());
        let mut created = Vec::with_capacity(plan.enroll.len());

        for planned in &plan.enroll {
            let Some(item) = by_uuid.get(&planned.item) else {
                continue;
            };

            // A concurrent confirmation may have enrolled the item since it was planned.
            if let Some(enrollment) = self
                .enrollments_repository
                .create_enrollment(&mut tx, student, item)
                .await?
            {
                enrollments.push(enrollment);
                created.push(*planned);
            }
        }

        let planned_notifications: Vec<_> = FanOut { enroll: created }.notifications().collect();
        let mut notifications = Vec::with_capacity(planned_notifications.len());

        for planned in planned_notifications {
            let (user_uuid, teacher_uuid) = match planned.recipient {
                Recipient::Teacher(teacher) => (None, Some(teacher)),
                Recipient::Student => (Some(student), None),
            };

            let notification = self
                .notifications_repository
                .create_notification(
                    &mut tx,
                    NewNotification {
                        uuid: NotificationUuid::new(),
                        user_uuid,
                        teacher_uuid,
                        order_uuid: Some(order),
                        order_item_uuid: Some(planned.item),
                        review_uuid: None,
                        kind: planned.kind,
                    },
                )
                .await?;

            notifications.push(notification);
        }

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(
            enrollments = enrollments.len(),
            notifications = notifications.len(),
            "confirmed payment"
        );

        Ok(PaymentConfirmation {
            order,
            enrollments,
            notifications,
        })
    }

    async fn list_enrollments(
        &self,
        user: UserUuid,
    ) -> Result<Vec<EnrollmentRecord>, EnrollmentsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let enrollments = self
            .enrollments_repository
            .list_for_user(&mut tx, user)
            .await?;

        tx.commit().await?;

        Ok(enrollments)
    }
}

#[automock]
#[async_trait]
pub trait EnrollmentsService: Send + Sync {
    /// Marks the order paid and enrolls the student in every item not yet enrolled.
    ///
    /// Each new enrollment notifies the course teacher ("New Order") when there is one,
    /// and the student ("Course Enrollment Completed"). Confirming a paid order again
    /// creates nothing new.
    async fn confirm_payment(
        &self,
        order: OrderUuid,
        reference: Option<String>,
    ) -> Result<PaymentConfirmation, EnrollmentsServiceError>;

    /// A student's enrollments, newest first.
    async fn list_enrollments(
        &self,
        user: UserUuid,
    ) -> Result<Vec<EnrollmentRecord>, EnrollmentsServiceError>;
}
