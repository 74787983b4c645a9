//! Command output.

use std::error::Error;

use serde::Serialize;

/// Renders a command result as pretty-printed JSON.
pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|error| format!("failed to render output: {error}"))
}

/// Joins an error with its chain of sources, outermost first.
pub(crate) fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

#[cfg(test)]
mod tests {
    use lectern::coupons::CouponRejection;
    use lectern_app::domain::coupons::CouponsServiceError;

    use super::*;

    #[test]
    fn error_chain_includes_sources() {
        let error = CouponsServiceError::InvalidCoupon(CouponRejection::AlreadyUsed);

        assert_eq!(
            error_chain(&error),
            "invalid coupon: coupon has already been used"
        );
    }

    #[test]
    fn renders_pretty_json() {
        assert_eq!(to_json(&[1, 2]), Ok("[\n  1,\n  2\n]".to_string()));
    }
}
