//! Order Totals

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::LinePrice;

/// Errors raised when order or line totals break their invariants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TotalsError {
    /// `total != price + tax_fee - discount`
    #[error(
        "line total {total} does not equal price {price} + tax {tax_fee} - discount {discount}"
    )]
    InconsistentLine {
        /// Line price.
        price: u64,
        /// Line tax.
        tax_fee: u64,
        /// Line discount.
        discount: u64,
        /// Stored line total.
        total: u64,
    },

    /// `saved != initial_total - total`
    #[error("line savings {saved} do not equal initial total {initial_total} - total {total}")]
    InconsistentSavings {
        /// Total before any discount.
        initial_total: u64,
        /// Stored line total.
        total: u64,
        /// Stored savings.
        saved: u64,
    },

    /// An order aggregate differs from the sum over its lines.
    #[error("order {field} is {actual} but its items sum to {expected}")]
    InconsistentOrder {
        /// Name of the aggregate column.
        field: &'static str,
        /// Sum over the lines.
        expected: u64,
        /// Stored aggregate.
        actual: u64,
    },

    /// A discount would make the price negative.
    #[error("discount {discount} exceeds price {price}")]
    DiscountExceedsPrice {
        /// Line price.
        price: u64,
        /// Accumulated discount.
        discount: u64,
    },

    /// Aggregate overflowed minor units.
    #[error("order totals overflowed")]
    Overflow,
}

/// A single order line (one course in a checkout), in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderLine {
    /// Course price at checkout.
    pub price: u64,

    /// Tax charged on the price.
    pub tax_fee: u64,

    /// Coupon discount taken off the line.
    pub discount: u64,

    /// `price + tax_fee - discount`
    pub total: u64,

    /// Total at checkout, before any discount.
    pub initial_total: u64,

    /// `initial_total - total`
    pub saved: u64,
}

impl OrderLine {
    /// Builds an undiscounted order line from a priced cart line.
    pub fn new(line: LinePrice) -> Self {
        Self {
            price: line.price,
            tax_fee: line.tax_fee,
            discount: 0,
            total: line.total,
            initial_total: line.total,
            saved: 0,
        }
    }

    /// Checks the line invariants.
    ///
    /// # Errors
    ///
    /// - [`TotalsError::InconsistentLine`]: total does not match price, tax and discount.
    /// - [`TotalsError::InconsistentSavings`]: savings do not match the initial total.
    pub fn check(&self) -> Result<(), TotalsError> {
        let expected_total = self
            .price
            .checked_add(self.tax_fee)
            .and_then(|gross| gross.checked_sub(self.discount));

        if expected_total != Some(self.total) {
            return Err(TotalsError::InconsistentLine {
                price: self.price,
                tax_fee: self.tax_fee,
                discount: self.discount,
                total: self.total,
            });
        }

        if self.initial_total.checked_sub(self.total) != Some(self.saved) {
            return Err(TotalsError::InconsistentSavings {
                initial_total: self.initial_total,
                total: self.total,
                saved: self.saved,
            });
        }

        Ok(())
    }

    /// Takes `discount` off the line, updating total and savings.
    ///
    /// The line is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// - [`TotalsError::DiscountExceedsPrice`]: the accumulated discount is above the price.
    /// - any invariant error from [`OrderLine::check`].
    pub fn apply_discount(&mut self, discount: u64) -> Result<(), TotalsError> {
        let accumulated = self
            .discount
            .checked_add(discount)
            .ok_or(TotalsError::Overflow)?;

        if accumulated > self.price {
            return Err(TotalsError::DiscountExceedsPrice {
                price: self.price,
                discount: accumulated,
            });
        }

        let mut next = *self;

        next.discount = accumulated;
        next.total = self
            .total
            .checked_sub(discount)
            .ok_or(TotalsError::Overflow)?;
        next.saved = next
            .initial_total
            .checked_sub(next.total)
            .ok_or(TotalsError::Overflow)?;

        next.check()?;

        *self = next;

        Ok(())
    }
}

/// Aggregate totals of an order, derived from its lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of line prices.
    pub sub_total: u64,

    /// Sum of line taxes.
    pub tax_fee: u64,

    /// Sum of line totals.
    pub total: u64,

    /// Sum of line initial totals.
    pub initial_total: u64,

    /// Sum of line savings.
    pub saved: u64,
}

impl OrderTotals {
    /// Sums the given lines after checking each one.
    ///
    /// # Errors
    ///
    /// Returns the first line invariant violation, or [`TotalsError::Overflow`].
    pub fn from_lines<I>(lines: I) -> Result<Self, TotalsError>
    where
        I: IntoIterator<Item = OrderLine>,
    {
        lines.into_iter().try_fold(Self::default(), |acc, line| {
            line.check()?;

            Ok(Self {
                sub_total: add(acc.sub_total, line.price)?,
                tax_fee: add(acc.tax_fee, line.tax_fee)?,
                total: add(acc.total, line.total)?,
                initial_total: add(acc.initial_total, line.initial_total)?,
                saved: add(acc.saved, line.saved)?,
            })
        })
    }

    /// Verifies these totals against the lines they should be derived from.
    ///
    /// # Errors
    ///
    /// Returns [`TotalsError::InconsistentOrder`] naming the first mismatching field, or any
    /// line invariant violation.
    pub fn verify<I>(&self, lines: I) -> Result<(), TotalsError>
    where
        I: IntoIterator<Item = OrderLine>,
    {
        let expected = Self::from_lines(lines)?;

        let fields = [
            ("sub_total", expected.sub_total, self.sub_total),
            ("tax_fee", expected.tax_fee, self.tax_fee),
            ("total", expected.total, self.total),
            ("initial_total", expected.initial_total, self.initial_total),
            ("saved", expected.saved, self.saved),
        ];

        match fields
            .into_iter()
            .find(|(_, expected, actual)| expected != actual)
        {
            Some((field, expected, actual)) => Err(TotalsError::InconsistentOrder {
                field,
                expected,
                actual,
            }),
            None => Ok(()),
        }
    }
}

fn add(lhs: u64, rhs: u64) -> Result<u64, TotalsError> {
    lhs.checked_add(rhs).ok_or(TotalsError::Overflow)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::pricing::price_line;

    use super::*;

    #[test]
    fn new_line_is_undiscounted() -> TestResult {
        let line = OrderLine::new(price_line(100_00, 5)?);

        assert_eq!(line.total, 105_00);
        assert_eq!(line.initial_total, 105_00);
        assert_eq!(line.saved, 0);
        line.check()?;

        Ok(())
    }

    #[test]
    fn discount_updates_total_and_savings() -> TestResult {
        let mut line = OrderLine::new(price_line(100_00, 5)?);

        line.apply_discount(10_00)?;

        assert_eq!(line.discount, 10_00);
        assert_eq!(line.total, 95_00);
        assert_eq!(line.saved, 10_00);

        Ok(())
    }

    #[test]
    fn discount_above_price_is_rejected_and_line_unchanged() -> TestResult {
        let mut line = OrderLine::new(price_line(10_00, 20)?);
        let before = line;

        let result = line.apply_discount(10_01);

        assert!(
            matches!(result, Err(TotalsError::DiscountExceedsPrice { .. })),
            "expected DiscountExceedsPrice, got {result:?}"
        );
        assert_eq!(line, before);

        Ok(())
    }

    #[test]
    fn tampered_line_fails_check() {
        let line = OrderLine {
            price: 100,
            tax_fee: 5,
            discount: 0,
            total: 100,
            initial_total: 105,
            saved: 5,
        };

        assert!(matches!(
            line.check(),
            Err(TotalsError::InconsistentLine { .. })
        ));
    }

    #[test]
    fn totals_sum_lines() -> TestResult {
        let mut discounted = OrderLine::new(price_line(100_00, 5)?);
        discounted.apply_discount(10_00)?;

        let plain = OrderLine::new(price_line(50_00, 5)?);

        let totals = OrderTotals::from_lines([discounted, plain])?;

        assert_eq!(totals.sub_total, 150_00);
        assert_eq!(totals.tax_fee, 7_50);
        assert_eq!(totals.total, 147_50);
        assert_eq!(totals.initial_total, 157_50);
        assert_eq!(totals.saved, 10_00);

        Ok(())
    }

    #[test]
    fn empty_order_has_zero_totals() -> TestResult {
        assert_eq!(OrderTotals::from_lines([])?, OrderTotals::default());

        Ok(())
    }

    #[test]
    fn verify_names_the_mismatching_field() -> TestResult {
        let line = OrderLine::new(price_line(100_00, 5)?);
        let mut totals = OrderTotals::from_lines([line])?;

        totals.verify([line])?;

        totals.total += 1;

        assert_eq!(
            totals.verify([line]),
            Err(TotalsError::InconsistentOrder {
                field: "total",
                expected: 105_00,
                actual: 105_01,
            })
        );

        Ok(())
    }
}
