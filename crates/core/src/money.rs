//! Money
//!
//! Amounts are carried as `u64` minor units everywhere; this module only turns them into
//! display strings in the marketplace currency.

use rusty_money::{Money, iso};

use crate::pricing::PricingError;

/// Formats minor units as a US dollar amount, e.g. `10500` as `$105.00`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the amount does not fit in `i64`.
pub fn format_amount(minor: u64) -> Result<String, PricingError> {
    let minor = i64::try_from(minor).map_err(|_overflow| PricingError::Overflow)?;

    Ok(Money::from_minor(minor, iso::USD).to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn formats_dollars_and_cents() -> TestResult {
        assert_eq!(format_amount(105_00)?, "$105.00");
        assert_eq!(format_amount(99)?, "$0.99");

        Ok(())
    }

    #[test]
    fn amounts_beyond_i64_are_rejected() {
        assert_eq!(format_amount(u64::MAX), Err(PricingError::Overflow));
    }
}
