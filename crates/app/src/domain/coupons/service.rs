//! Coupons service.

use async_trait::async_trait;
use lectern::{
    coupons::{CouponRejection, apply_to_line, check_redeemable},
    orders::OrderTotals,
    payments::PaymentStatus,
};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        coupons::{
            data::NewCoupon,
            errors::CouponsServiceError,
            records::CouponRecord,
            repositories::PgCouponsRepository,
        },
        orders::{
            records::{OrderItemRecord, OrderItemUuid, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    coupons_repository: PgCouponsRepository,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            coupons_repository: PgCouponsRepository::new(),
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
        }
    }

    /// Locks the coupon and checks the user may still redeem it.
    async fn redeemable_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        code: &str,
    ) -> Result<CouponRecord, CouponsServiceError> {
        let coupon = self
            .coupons_repository
            .lock_coupon(tx, code)
            .await?
            .ok_or(CouponRejection::UnknownCode)?;

        let used = self
            .coupons_repository
            .is_used_by(tx, coupon.uuid, user)
            .await?;

        check_redeemable(&coupon.terms(), used)?;

        Ok(coupon)
    }

    /// Discounts `item`, storing the new line and the coupon on the item and the order.
    async fn discount_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &CouponRecord,
        item: &mut OrderItemRecord,
    ) -> Result<u64, CouponsServiceError> {
        if !coupon.covers(item.teacher_uuid) {
            return Err(CouponRejection::NotApplicable.into());
        }

        let mut line = item.line();
        let discount = apply_to_line(&mut line, &coupon.terms(), item.applied_coupon)?;

        self.items_repository
            .apply_coupon(tx, item.uuid, line, coupon.uuid)
            .await?;

        item.discount = line.discount;
        item.total = line.total;
        item.saved = line.saved;
        item.coupon_uuid = Some(coupon.uuid);
        item.applied_coupon = true;

        debug!(order_item_uuid = %item.uuid, discount, "discounted order item");

        Ok(discount)
    }

    /// Records usage and recomputes the order totals from its items.
    async fn settle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        coupon: &CouponRecord,
        order: OrderUuid,
        items: &[OrderItemRecord],
    ) -> Result<OrderRecord, CouponsServiceError> {
        self.orders_repository
            .add_coupon(tx, order, coupon.uuid)
            .await?;

        self.coupons_repository
            .mark_used(tx, coupon.uuid, user)
            .await?;

        let totals = OrderTotals::from_lines(items.iter().map(OrderItemRecord::line))?;

        self.orders_repository
            .update_totals(tx, order, totals)
            .await?;

        let updated = self.orders_repository.get_order(tx, order).await?;

        updated.totals().verify(updated.lines())?;

        Ok(updated)
    }
}

fn ensure_unpaid(order: &OrderRecord) -> Result<(), CouponsServiceError> {
    if order.payment_status == PaymentStatus::Paid {
        return Err(CouponRejection::NotApplicable.into());
    }

    Ok(())
}

#[async_trait]
impl CouponsService for PgCouponsService {
    #[tracing::instrument(
        name = "coupons.service.create_coupon",
        skip(self, coupon),
        fields(coupon_uuid = %coupon.uuid, discount = coupon.discount),
        err
    )]
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.coupons_repository.create_coupon(&mut tx, coupon).await?;

        tx.commit().await?;

        info!(coupon_uuid = %created.uuid, "created coupon");

        Ok(created)
    }

    async fn find_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.coupons_repository.find_coupon(&mut tx, code).await?;

        tx.commit().await?;

        coupon.ok_or(CouponsServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "coupons.service.apply_coupon",
        skip(self, code),
        fields(user_uuid = %user, order_item_uuid = %item),
        err
    )]
    async fn apply_coupon(
        &self,
        user: UserUuid,
        item: OrderItemUuid,
        code: &str,
    ) -> Result<OrderRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.redeemable_coupon(&mut tx, user, code).await?;

        let order = self
            .orders_repository
            .lock_order_for_item(&mut tx, item, user)
            .await?;

        ensure_unpaid(&order)?;

        let mut items = self
            .items_repository
            .lock_order_items(&mut tx, order.uuid)
            .await?;

        let target = items
            .iter_mut()
            .find(|candidate| candidate.uuid == item)
            .ok_or(CouponsServiceError::NotFound)?;

        let discount = self.discount_item(&mut tx, &coupon, target).await?;

        let updated = self
            .settle(&mut tx, user, &coupon, order.uuid, &items)
            .await?;

        tx.commit().await?;

        info!(
            coupon_uuid = %coupon.uuid,
            order_uuid = %updated.uuid,
            discount,
            total = updated.total,
            "applied coupon to order item"
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "coupons.service.apply_coupon_to_order",
        skip(self, code),
        fields(user_uuid = %user, order_uuid = %order),
        err
    )]
    async fn apply_coupon_to_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        code: &str,
    ) -> Result<OrderRecord, CouponsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let coupon = self.redeemable_coupon(&mut tx, user, code).await?;

        let locked = self.orders_repository.lock_order(&mut tx, order).await?;

        if locked.student_uuid != user {
            return Err(CouponsServiceError::NotFound);
        }

        ensure_unpaid(&locked)?;

        let mut items = self
            .items_repository
            .lock_order_items(&mut tx, order)
            .await?;

        let mut discounted = 0_usize;
        let mut discount = 0_u64;

        for item in &mut items {
            if item.applied_coupon || !coupon.covers(item.teacher_uuid) {
                continue;
            }

            let taken = self.discount_item(&mut tx, &coupon, item).await?;

            discount = discount.saturating_add(taken);
            discounted += 1;
        }

        if discounted == 0 {
            return Err(CouponRejection::NotApplicable.into());
        }

        let updated = self
            .settle(&mut tx, user, &coupon, order, &items)
            .await?;

        tx.commit().await?;

        info!(
            coupon_uuid = %coupon.uuid,
            items = discounted,
            discount,
            total = updated.total,
            "applied coupon to order"
        );

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;

    /// Retrieve a coupon by code.
    async fn find_coupon(&self, code: &str) -> Result<CouponRecord, CouponsServiceError>;

    /// Redeems `code` against one item of one of the user's unpaid orders.
    ///
    /// The discount is the coupon percentage of the item price. The order totals are
    /// recomputed and the user may not redeem the same coupon again.
    async fn apply_coupon(
        &self,
        user: UserUuid,
        item: OrderItemUuid,
        code: &str,
    ) -> Result<OrderRecord, CouponsServiceError>;

    /// Redeems `code` against every eligible item of the order that carries no coupon yet.
    async fn apply_coupon_to_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        code: &str,
    ) -> Result<OrderRecord, CouponsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lectern::coupons::CouponRejection;
    use testresult::TestResult;

    use crate::{
        domain::{
            catalog::records::TeacherUuid,
            coupons::records::CouponUuid,
            orders::{
                OrdersService,
                records::{OrderItemUuid, OrderRecord},
            },
            users::UserUuid,
        },
        test::{TestContext, helpers},
    };

    use super::*;

    /// Checks out one $100 course with a teacher and one $40 course without, taxed at 5%.
    async fn checked_out_order(
        ctx: &TestContext,
        student: UserUuid,
    ) -> TestResult<(TeacherUuid, OrderRecord)> {
        helpers::create_country(ctx, "Ghana", 5).await?;
        let teacher = helpers::create_teacher(ctx, "Edsger Dijkstra").await?;
        let a = helpers::create_course(ctx, Some(teacher.uuid), "Course A", 100_00).await?;
        let b = helpers::create_course(ctx, None, "Course B", 40_00).await?;

        helpers::add_to_cart(ctx, student, a.uuid, Some("Ghana")).await?;
        helpers::add_to_cart(ctx, student, b.uuid, Some("Ghana")).await?;

        let order = helpers::checkout(ctx, student).await?;

        Ok((teacher.uuid, order))
    }

    fn first_item(order: &OrderRecord) -> TestResult<OrderItemUuid> {
        Ok(order.items.first().ok_or("order has no items")?.uuid)
    }

    #[tokio::test]
    async fn applying_coupon_discounts_item_and_order() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (_, order) = checked_out_order(&ctx, student).await?;

        helpers::create_coupon(&ctx, None, "TENOFF", 10).await?;

        let item = first_item(&order)?;
        let updated = ctx.coupons.apply_coupon(student, item, "TENOFF").await?;

        let discounted = updated
            .items
            .iter()
            .find(|candidate| candidate.uuid == item)
            .ok_or("item missing")?;

        assert_eq!(discounted.discount, 10_00);
        assert_eq!(discounted.total, 95_00);
        assert_eq!(discounted.saved, 10_00);
        assert!(discounted.applied_coupon);

        assert_eq!(updated.total, 137_00);
        assert_eq!(updated.saved, 10_00);
        assert_eq!(updated.initial_total, 147_00);
        assert_eq!(updated.coupons.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn second_application_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (_, order) = checked_out_order(&ctx, student).await?;

        helpers::create_coupon(&ctx, None, "ONCE", 10).await?;

        let item = first_item(&order)?;
        ctx.coupons.apply_coupon(student, item, "ONCE").await?;

        let result = ctx.coupons.apply_coupon(student, item, "ONCE").await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::InvalidCoupon(CouponRejection::AlreadyUsed))
            ),
            "expected AlreadyUsed, got {result:?}"
        );

        let reloaded = ctx.orders.get_order(order.uuid).await?;

        assert_eq!(reloaded.total, 137_00);

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_applications_redeem_once() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (_, order) = checked_out_order(&ctx, student).await?;

        helpers::create_coupon(&ctx, None, "RACE", 10).await?;

        let mut items = order.items.iter().map(|item| item.uuid);
        let first = items.next().ok_or("order has no items")?;
        let second = items.next().ok_or("order has one item")?;

        // Both applications queue behind the coupon row lock and then run one at a time.
        let mut blocker = ctx.db.pool().begin().await?;

        sqlx::query("SELECT uuid FROM coupons WHERE code = $1 FOR UPDATE")
            .bind("RACE")
            .execute(&mut *blocker)
            .await?;

        let release = async {
            tokio::time::sleep(Duration::from_millis(250)).await;

            blocker.rollback().await
        };

        let (first_result, second_result, released) = tokio::join!(
            ctx.coupons.apply_coupon(student, first, "RACE"),
            ctx.coupons.apply_coupon(student, second, "RACE"),
            release,
        );

        released?;

        let results = [first_result, second_result];
        let succeeded = results.iter().filter(|result| result.is_ok()).count();

        assert_eq!(succeeded, 1, "exactly one application succeeds: {results:?}");
        assert!(
            results.iter().any(|result| matches!(
                result,
                Err(CouponsServiceError::InvalidCoupon(CouponRejection::AlreadyUsed))
            )),
            "the other application sees the coupon as used: {results:?}"
        );

        let reloaded = ctx.orders.get_order(order.uuid).await?;
        let discounted = reloaded.items.iter().filter(|item| item.applied_coupon).count();

        assert_eq!(discounted, 1);
        assert_eq!(reloaded.total, reloaded.initial_total - reloaded.saved);
        assert!(reloaded.saved == 10_00 || reloaded.saved == 4_00);

        Ok(())
    }

    #[tokio::test]
    async fn unknown_and_inactive_codes_are_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (_, order) = checked_out_order(&ctx, student).await?;
        let item = first_item(&order)?;

        let unknown = ctx.coupons.apply_coupon(student, item, "NOPE").await;

        assert!(
            matches!(
                unknown,
                Err(CouponsServiceError::InvalidCoupon(CouponRejection::UnknownCode))
            ),
            "expected UnknownCode, got {unknown:?}"
        );

        ctx.coupons
            .create_coupon(NewCoupon {
                uuid: CouponUuid::new(),
                teacher_uuid: None,
                code: "SLEEPING".to_string(),
                discount: 50,
                active: false,
            })
            .await?;

        let inactive = ctx.coupons.apply_coupon(student, item, "SLEEPING").await;

        assert!(
            matches!(
                inactive,
                Err(CouponsServiceError::InvalidCoupon(CouponRejection::Inactive))
            ),
            "expected Inactive, got {inactive:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_students_items_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, order) = checked_out_order(&ctx, UserUuid::new()).await?;

        helpers::create_coupon(&ctx, None, "THIEF", 10).await?;

        let result = ctx
            .coupons
            .apply_coupon(UserUuid::new(), first_item(&order)?, "THIEF")
            .await;

        assert!(
            matches!(result, Err(CouponsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn teacher_coupon_only_covers_their_courses() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (teacher, order) = checked_out_order(&ctx, student).await?;

        helpers::create_coupon(&ctx, Some(teacher), "TEACHER20", 20).await?;

        let updated = ctx
            .coupons
            .apply_coupon_to_order(student, order.uuid, "TEACHER20")
            .await?;

        let discounted: Vec<_> = updated
            .items
            .iter()
            .filter(|item| item.applied_coupon)
            .collect();

        assert_eq!(discounted.len(), 1);
        assert_eq!(discounted.first().map(|item| item.teacher_uuid), Some(Some(teacher)));
        assert_eq!(updated.saved, 20_00);
        assert_eq!(updated.total, 127_00);

        Ok(())
    }

    #[tokio::test]
    async fn order_wide_coupon_needs_an_eligible_item() -> TestResult {
        let ctx = TestContext::new().await;
        let student = UserUuid::new();
        let (_, order) = checked_out_order(&ctx, student).await?;
        let stranger = helpers::create_teacher(&ctx, "Barbara Liskov").await?;

        helpers::create_coupon(&ctx, Some(stranger.uuid), "ELSEWHERE", 10).await?;

        let result = ctx
            .coupons
            .apply_coupon_to_order(student, order.uuid, "ELSEWHERE")
            .await;

        assert!(
            matches!(
                result,
                Err(CouponsServiceError::InvalidCoupon(CouponRejection::NotApplicable))
            ),
            "expected NotApplicable, got {result:?}"
        );

        Ok(())
    }
}
