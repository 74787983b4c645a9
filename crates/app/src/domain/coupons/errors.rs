//! Coupons service errors.

use lectern::{
    coupons::{CouponError, CouponRejection},
    orders::TotalsError,
    pricing::PricingError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("coupon already exists")]
    AlreadyExists,

    #[error("coupon, order or order item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("invalid coupon")]
    InvalidCoupon(#[from] CouponRejection),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("inconsistent order totals")]
    InconsistentTotal(#[from] TotalsError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<CouponError> for CouponsServiceError {
    fn from(error: CouponError) -> Self {
        match error {
            CouponError::Rejected(rejection) => Self::InvalidCoupon(rejection),
            CouponError::Pricing(error) => Self::Pricing(error),
            CouponError::Totals(error) => Self::InconsistentTotal(error),
        }
    }
}

impl From<Error> for CouponsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            _ => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rejections_become_invalid_coupon() {
        let error = CouponsServiceError::from(CouponError::from(CouponRejection::AlreadyApplied));

        assert!(matches!(
            error,
            CouponsServiceError::InvalidCoupon(CouponRejection::AlreadyApplied)
        ));
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            CouponsServiceError::from(Error::RowNotFound),
            CouponsServiceError::NotFound
        ));
    }
}
