//! Coupons
//!
//! A coupon is a whole-number percentage taken off a line's price (not its tax). A user may
//! redeem a given coupon once, and a line carries at most one coupon.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    orders::{OrderLine, TotalsError},
    pricing::{PricingError, percent_of},
};

/// Reasons a coupon code is refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponRejection {
    /// No coupon has this code.
    #[error("coupon code is not recognised")]
    UnknownCode,

    /// The coupon exists but is switched off.
    #[error("coupon is not active")]
    Inactive,

    /// The user has already redeemed this coupon.
    #[error("coupon has already been used")]
    AlreadyUsed,

    /// The line already carries a coupon.
    #[error("a coupon has already been applied to this item")]
    AlreadyApplied,

    /// The coupon belongs to a different teacher's courses.
    #[error("coupon does not apply to this course")]
    NotApplicable,
}

/// Errors from redeeming a coupon against a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CouponError {
    /// The coupon was refused.
    #[error(transparent)]
    Rejected(#[from] CouponRejection),

    /// The discount could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The discounted line broke its invariants.
    #[error(transparent)]
    Totals(#[from] TotalsError),
}

/// The parts of a coupon that decide whether and how much it discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponTerms {
    /// Percentage off the line price.
    pub discount: u32,

    /// Whether the coupon can currently be redeemed.
    pub active: bool,
}

/// Checks that `terms` may be redeemed by a user.
///
/// # Errors
///
/// - [`CouponRejection::Inactive`]: the coupon is switched off.
/// - [`CouponRejection::AlreadyUsed`]: `used_by_user` is set.
pub fn check_redeemable(terms: &CouponTerms, used_by_user: bool) -> Result<(), CouponRejection> {
    if !terms.active {
        return Err(CouponRejection::Inactive);
    }

    if used_by_user {
        return Err(CouponRejection::AlreadyUsed);
    }

    Ok(())
}

/// Applies the coupon to a line that carries no coupon yet, returning the discount taken.
///
/// # Errors
///
/// - [`CouponRejection::AlreadyApplied`]: `line_has_coupon` is set.
/// - [`CouponError::Pricing`]: the coupon percentage is out of range.
/// - [`CouponError::Totals`]: the discounted line would break its invariants.
pub fn apply_to_line(
    line: &mut OrderLine,
    terms: &CouponTerms,
    line_has_coupon: bool,
) -> Result<u64, CouponError> {
    if line_has_coupon {
        return Err(CouponRejection::AlreadyApplied.into());
    }

    let discount = percent_of(line.price, terms.discount)?;

    line.apply_discount(discount)?;

    Ok(discount)
}
