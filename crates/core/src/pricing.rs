//! Pricing

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted percentage for tax rates and discounts.
pub const MAX_PERCENT: u32 = 100;

/// Errors that can occur while pricing a line.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PricingError {
    /// Percentage was above [`MAX_PERCENT`].
    #[error("percentage {0} is outside 0..=100")]
    PercentOutOfRange(u32),

    /// Amount could not be represented in minor units.
    #[error("amount overflowed")]
    Overflow,
}

/// Price, tax and total of a single cart line, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinePrice {
    /// Course price before tax.
    pub price: u64,

    /// Tax charged on the price.
    pub tax_fee: u64,

    /// `price + tax_fee`
    pub total: u64,
}

/// Prices a line for a course at the given country tax rate.
///
/// # Errors
///
/// - [`PricingError::PercentOutOfRange`]: the tax rate is above 100.
/// - [`PricingError::Overflow`]: the total does not fit in minor units.
pub fn price_line(price: u64, tax_rate: u32) -> Result<LinePrice, PricingError> {
    let tax_fee = percent_of(price, tax_rate)?;
    let total = price.checked_add(tax_fee).ok_or(PricingError::Overflow)?;

    Ok(LinePrice {
        price,
        tax_fee,
        total,
    })
}

/// Calculates `percent` of `amount`, rounding half away from zero to a whole minor unit.
///
/// # Errors
///
/// - [`PricingError::PercentOutOfRange`]: `percent` is above 100.
/// - [`PricingError::Overflow`]: the intermediate product cannot be represented.
pub fn percent_of(amount: u64, percent: u32) -> Result<u64, PricingError> {
    if percent > MAX_PERCENT {
        return Err(PricingError::PercentOutOfRange(percent));
    }

    let Some(applied) = Decimal::from(amount)
        .checked_mul(Decimal::from(percent))
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
    else {
        return Err(PricingError::Overflow);
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn prices_line_with_five_percent_tax() -> TestResult {
        let line = price_line(100_00, 5)?;

        assert_eq!(line.tax_fee, 5_00);
        assert_eq!(line.total, 105_00);

        Ok(())
    }

    #[test]
    fn zero_tax_rate_leaves_total_at_price() -> TestResult {
        let line = price_line(49_99, 0)?;

        assert_eq!(line.tax_fee, 0);
        assert_eq!(line.total, 49_99);

        Ok(())
    }

    #[test]
    fn percent_rounds_half_away_from_zero() -> TestResult {
        // 5% of 10 minor units is 0.5
        assert_eq!(percent_of(10, 5)?, 1);
        // 5% of 9 minor units is 0.45
        assert_eq!(percent_of(9, 5)?, 0);

        Ok(())
    }

    #[test]
    fn full_percent_is_the_whole_amount() -> TestResult {
        assert_eq!(percent_of(12_345, 100)?, 12_345);

        Ok(())
    }

    #[test]
    fn percent_above_one_hundred_is_rejected() {
        assert_eq!(
            percent_of(100, 101),
            Err(PricingError::PercentOutOfRange(101))
        );
    }

    #[test]
    fn overflowing_total_is_rejected() {
        assert_eq!(price_line(u64::MAX, 10), Err(PricingError::Overflow));
    }
}
