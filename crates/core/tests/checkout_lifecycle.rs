//! Walks a two-course checkout through pricing, coupon redemption, payment and fan-out.
//!
//! Course A costs $100.00 and course B $40.00, both taxed at 5%:
//!
//! - A: $100.00 + $5.00 tax = $105.00
//! - B: $40.00 + $2.00 tax = $42.00
//!
//! A 10% coupon from A's teacher takes $10.00 off A's price, so the order total falls from
//! $147.00 to $137.00 with $10.00 saved.

use rustc_hash::FxHashSet;
use testresult::TestResult;

use lectern::{
    coupons::{CouponError, CouponRejection, CouponTerms, apply_to_line, check_redeemable},
    enrollments::{PaidItem, Recipient, plan_fan_out},
    notifications::NotificationKind,
    orders::{OrderLine, OrderTotals},
    payments::{Confirmation, PaymentStatus},
    pricing::price_line,
};

#[test]
fn checkout_with_coupon_then_payment() -> TestResult {
    let mut lines = [
        OrderLine::new(price_line(100_00, 5)?),
        OrderLine::new(price_line(40_00, 5)?),
    ];

    let totals = OrderTotals::from_lines(lines)?;

    assert_eq!(totals.total, 147_00);
    assert_eq!(totals.initial_total, 147_00);

    let coupon = CouponTerms {
        discount: 10,
        active: true,
    };

    let [course_a, _] = &mut lines;

    check_redeemable(&coupon, false)?;
    let discount = apply_to_line(course_a, &coupon, false)?;

    assert_eq!(discount, 10_00);

    let totals = OrderTotals::from_lines(lines)?;

    assert_eq!(totals.sub_total, 140_00);
    assert_eq!(totals.tax_fee, 7_00);
    assert_eq!(totals.total, 137_00);
    assert_eq!(totals.saved, 10_00);
    totals.verify(lines)?;

    // Redeeming again is refused both for the user and for the line.
    assert_eq!(
        check_redeemable(&coupon, true),
        Err(CouponRejection::AlreadyUsed)
    );
    let [course_a, _] = &mut lines;
    assert_eq!(
        apply_to_line(course_a, &coupon, true),
        Err(CouponError::Rejected(CouponRejection::AlreadyApplied))
    );

    assert_eq!(PaymentStatus::Processing.confirm(), Confirmation::Settled);

    let paid = [
        PaidItem {
            item: "item-a",
            teacher: Some("teacher-a"),
        },
        PaidItem {
            item: "item-b",
            teacher: Some("teacher-b"),
        },
    ];

    let plan = plan_fan_out(&paid, &FxHashSet::default());
    let notifications: Vec<_> = plan.notifications().collect();

    assert_eq!(plan.enroll.len(), 2);
    assert_eq!(
        notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::NewOrder)
            .count(),
        2
    );
    assert!(
        notifications
            .iter()
            .any(|n| n.recipient == Recipient::Teacher("teacher-b"))
    );

    assert_eq!(PaymentStatus::Paid.confirm(), Confirmation::AlreadyPaid);

    let enrolled: FxHashSet<_> = plan.enroll.iter().map(|paid| paid.item).collect();

    assert!(plan_fan_out(&paid, &enrolled).is_empty());

    Ok(())
}
