//! Enrollments Repository

use rustc_hash::FxHashSet;
use sqlx::{FromRow, Postgres, Transaction, postgres::PgRow, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    catalog::records::TeacherUuid,
    columns::{try_get_optional_uuid, try_get_timestamp, try_get_uuid},
    enrollments::records::{EnrollmentRecord, EnrollmentUuid},
    orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    users::UserUuid,
};

const CREATE_ENROLLMENT_SQL: &str = include_str!("../sql/create_enrollment.sql");
const LIST_ORDER_ENROLLMENTS_SQL: &str = include_str!("../sql/list_order_enrollments.sql");
const LIST_USER_ENROLLMENTS_SQL: &str = include_str!("../sql/list_user_enrollments.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgEnrollmentsRepository;

impl PgEnrollmentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Enrolls `student` in the item's course. Returns `None` when the item already has
    /// an enrollment.
    pub(crate) async fn create_enrollment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        student: UserUuid,
        item: &OrderItemRecord,
    ) -> Result<Option<EnrollmentRecord>, sqlx::Error> {
        query_as::<Postgres, EnrollmentRecord>(CREATE_ENROLLMENT_SQL)
            .bind(EnrollmentUuid::new().into_uuid())
            .bind(item.course_uuid.into_uuid())
            .bind(student.into_uuid())
            .bind(item.teacher_uuid.map(TeacherUuid::into_uuid))
            .bind(item.uuid.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Items of the order that already have an enrollment.
    pub(crate) async fn enrolled_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<FxHashSet<OrderItemUuid>, sqlx::Error> {
        let uuids = query_scalar::<Postgres, Uuid>(LIST_ORDER_ENROLLMENTS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(uuids.into_iter().map(OrderItemUuid::from_uuid).collect())
    }

    pub(crate) async fn list_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<EnrollmentRecord>, sqlx::Error> {
        query_as::<Postgres, EnrollmentRecord>(LIST_USER_ENROLLMENTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for EnrollmentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            user_uuid: try_get_uuid(row, "user_uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            order_item_uuid: try_get_uuid(row, "order_item_uuid")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
