//! Order Items Repository

use lectern::orders::OrderLine;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::records::{CourseUuid, TeacherUuid},
    columns::{amount_param, try_get_amount, try_get_optional_uuid, try_get_timestamp, try_get_uuid},
    coupons::records::CouponUuid,
    orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const LOCK_ORDER_ITEMS_SQL: &str = include_str!("../sql/lock_order_items.sql");
const APPLY_ITEM_COUPON_SQL: &str = include_str!("../sql/apply_item_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        course: CourseUuid,
        teacher: Option<TeacherUuid>,
        line: OrderLine,
    ) -> Result<OrderItemRecord, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEM_SQL)
            .bind(OrderItemUuid::new().into_uuid())
            .bind(order.into_uuid())
            .bind(course.into_uuid())
            .bind(teacher.map(TeacherUuid::into_uuid))
            .bind(amount_param(line.price, "price")?)
            .bind(amount_param(line.tax_fee, "tax_fee")?)
            .bind(amount_param(line.discount, "discount")?)
            .bind(amount_param(line.total, "total")?)
            .bind(amount_param(line.initial_total, "initial_total")?)
            .bind(amount_param(line.saved, "saved")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Locks every item of the order until the transaction ends.
    pub(crate) async fn lock_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Postgres, OrderItemRecord>(LOCK_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Stores a discounted line and the coupon that produced it.
    pub(crate) async fn apply_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        line: OrderLine,
        coupon: CouponUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(APPLY_ITEM_COUPON_SQL)
            .bind(item.into_uuid())
            .bind(amount_param(line.discount, "discount")?)
            .bind(amount_param(line.total, "total")?)
            .bind(amount_param(line.saved, "saved")?)
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            order_uuid: try_get_uuid(row, "order_uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            price: try_get_amount(row, "price")?,
            tax_fee: try_get_amount(row, "tax_fee")?,
            discount: try_get_amount(row, "discount")?,
            total: try_get_amount(row, "total")?,
            initial_total: try_get_amount(row, "initial_total")?,
            saved: try_get_amount(row, "saved")?,
            coupon_uuid: try_get_optional_uuid(row, "coupon_uuid")?,
            applied_coupon: row.try_get("applied_coupon")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
