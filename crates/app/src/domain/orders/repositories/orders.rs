//! Orders Repository

use lectern::{orders::OrderTotals, payments::PaymentStatus};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::records::TeacherUuid,
        columns::{amount_param, try_get_amount, try_get_parsed, try_get_timestamp, try_get_uuid},
        coupons::records::CouponUuid,
        orders::{
            data::NewOrder,
            records::{OrderItemUuid, OrderRecord, OrderUuid},
            repositories::PgOrderItemsRepository,
        },
        users::UserUuid,
    },
    uuids::TypedUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("../sql/lock_order.sql");
const LOCK_ORDER_FOR_ITEM_SQL: &str = include_str!("../sql/lock_order_for_item.sql");
const LIST_STUDENT_ORDERS_SQL: &str = include_str!("../sql/list_student_orders.sql");
const UPDATE_ORDER_TOTALS_SQL: &str = include_str!("../sql/update_order_totals.sql");
const SET_PAYMENT_STATUS_SQL: &str = include_str!("../sql/set_payment_status.sql");
const ADD_ORDER_TEACHER_SQL: &str = include_str!("../sql/add_order_teacher.sql");
const LIST_ORDER_TEACHERS_SQL: &str = include_str!("../sql/list_order_teachers.sql");
const ADD_ORDER_COUPON_SQL: &str = include_str!("../sql/add_order_coupon.sql");
const LIST_ORDER_COUPONS_SQL: &str = include_str!("../sql/list_order_coupons.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository {
    items: PgOrderItemsRepository,
}

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            items: PgOrderItemsRepository::new(),
        }
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrder,
        totals: OrderTotals,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.student_uuid.into_uuid())
            .bind(amount_param(totals.sub_total, "sub_total")?)
            .bind(amount_param(totals.tax_fee, "tax_fee")?)
            .bind(amount_param(totals.total, "total")?)
            .bind(amount_param(totals.initial_total, "initial_total")?)
            .bind(amount_param(totals.saved, "saved")?)
            .bind(order.full_name)
            .bind(order.email)
            .bind(order.country)
            .fetch_one(&mut **tx)
            .await
    }

    /// Loads an order with its items, teachers and coupons.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let header = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        self.with_details(tx, header).await
    }

    /// Locks the order row until the transaction ends. Details are not loaded.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Locks the order holding `item`, provided `student` placed it.
    pub(crate) async fn lock_order_for_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        student: UserUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LOCK_ORDER_FOR_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(student.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_student_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        student: UserUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let headers = query_as::<Postgres, OrderRecord>(LIST_STUDENT_ORDERS_SQL)
            .bind(student.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let mut orders = Vec::with_capacity(headers.len());

        for header in headers {
            orders.push(self.with_details(tx, header).await?);
        }

        Ok(orders)
    }

    pub(crate) async fn update_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        totals: OrderTotals,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_TOTALS_SQL)
            .bind(order.into_uuid())
            .bind(amount_param(totals.sub_total, "sub_total")?)
            .bind(amount_param(totals.tax_fee, "tax_fee")?)
            .bind(amount_param(totals.total, "total")?)
            .bind(amount_param(totals.initial_total, "initial_total")?)
            .bind(amount_param(totals.saved, "saved")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Sets the payment status, keeping any stored reference when `reference` is `None`.
    pub(crate) async fn set_payment_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: PaymentStatus,
        reference: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_PAYMENT_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(reference)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn add_teacher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        teacher: TeacherUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_ORDER_TEACHER_SQL)
            .bind(order.into_uuid())
            .bind(teacher.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn add_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        coupon: CouponUuid,
    ) -> Result<(), sqlx::Error> {
        query(ADD_ORDER_COUPON_SQL)
            .bind(order.into_uuid())
            .bind(coupon.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    async fn with_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, sqlx::Error> {
        order.items = self.items.list_order_items(tx, order.uuid).await?;
        order.teachers = list_uuids(tx, LIST_ORDER_TEACHERS_SQL, order.uuid).await?;
        order.coupons = list_uuids(tx, LIST_ORDER_COUPONS_SQL, order.uuid).await?;

        Ok(order)
    }
}

async fn list_uuids<T>(
    tx: &mut Transaction<'_, Postgres>,
    sql: &'static str,
    order: OrderUuid,
) -> Result<Vec<TypedUuid<T>>, sqlx::Error> {
    let uuids = query_scalar::<Postgres, Uuid>(sql)
        .bind(order.into_uuid())
        .fetch_all(&mut **tx)
        .await?;

    Ok(uuids.into_iter().map(TypedUuid::from_uuid).collect())
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            student_uuid: try_get_uuid(row, "student_uuid")?,
            sub_total: try_get_amount(row, "sub_total")?,
            tax_fee: try_get_amount(row, "tax_fee")?,
            total: try_get_amount(row, "total")?,
            initial_total: try_get_amount(row, "initial_total")?,
            saved: try_get_amount(row, "saved")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            country: row.try_get("country")?,
            payment_reference: row.try_get("payment_reference")?,
            teachers: Vec::new(),
            coupons: Vec::new(),
            items: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
