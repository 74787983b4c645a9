//! Coupons Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    catalog::records::TeacherUuid,
    columns::{percent_param, try_get_optional_uuid, try_get_percent, try_get_timestamp, try_get_uuid},
    coupons::{
        data::NewCoupon,
        records::{CouponRecord, CouponUuid},
    },
    users::UserUuid,
};

const CREATE_COUPON_SQL: &str = include_str!("../sql/create_coupon.sql");
const FIND_COUPON_SQL: &str = include_str!("../sql/find_coupon.sql");
const LOCK_COUPON_SQL: &str = include_str!("../sql/lock_coupon.sql");
const COUPON_USED_BY_SQL: &str = include_str!("../sql/coupon_used_by.sql");
const MARK_COUPON_USED_SQL: &str = include_str!("../sql/mark_coupon_used.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: NewCoupon,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(CREATE_COUPON_SQL)
            .bind(coupon.uuid.into_uuid())
            .bind(coupon.teacher_uuid.map(TeacherUuid::into_uuid))
            .bind(coupon.code)
            .bind(percent_param(coupon.discount, "discount")?)
            .bind(coupon.active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(FIND_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Finds a coupon by code and locks it until the transaction ends.
    pub(crate) async fn lock_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Postgres, CouponRecord>(LOCK_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn is_used_by(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        user: UserUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(COUPON_USED_BY_SQL)
            .bind(coupon.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_used(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: CouponUuid,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(MARK_COUPON_USED_SQL)
            .bind(coupon.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for CouponRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            code: row.try_get("code")?,
            discount: try_get_percent(row, "discount")?,
            active: row.try_get("active")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
