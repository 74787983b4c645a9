//! Course Reviews
//!
//! Star ratings left by enrolled students and the per-course aggregate shown in listings.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest star rating.
pub const MIN_RATING: u32 = 1;

/// Highest star rating.
pub const MAX_RATING: u32 = 5;

/// Rating was outside [`MIN_RATING`]..=[`MAX_RATING`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("rating {0} is outside 1..=5")]
pub struct InvalidRating(pub u32);

/// Checks a star rating.
///
/// # Errors
///
/// Returns [`InvalidRating`] when `rating` is outside 1..=5.
pub fn check_rating(rating: u32) -> Result<u32, InvalidRating> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(InvalidRating(rating))
    }
}

/// Count and sum of a course's visible ratings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Number of ratings.
    pub count: u64,

    /// Sum of the ratings.
    pub sum: u64,
}

impl RatingSummary {
    /// Summarises a set of ratings.
    pub fn from_ratings(ratings: impl IntoIterator<Item = u32>) -> Self {
        ratings
            .into_iter()
            .fold(Self::default(), |summary, rating| Self {
                count: summary.count.saturating_add(1),
                sum: summary.sum.saturating_add(u64::from(rating)),
            })
    }

    /// Mean rating rounded to two decimal places, or `None` without ratings.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }

        Decimal::from(self.sum)
            .checked_div(Decimal::from(self.count))?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert_eq!(check_rating(1), Ok(1));
        assert_eq!(check_rating(5), Ok(5));
        assert_eq!(check_rating(0), Err(InvalidRating(0)));
        assert_eq!(check_rating(6), Err(InvalidRating(6)));
    }

    #[test]
    fn average_rounds_to_two_places() -> TestResult {
        let summary = RatingSummary::from_ratings([5, 4, 4]);

        assert_eq!(summary, RatingSummary { count: 3, sum: 13 });
        let average = summary.average().ok_or("missing average")?;

        assert!((average - 4.33).abs() < f64::EPSILON, "average was {average}");

        Ok(())
    }

    #[test]
    fn no_ratings_have_no_average() {
        assert_eq!(RatingSummary::default().average(), None);
        assert_eq!(RatingSummary::from_ratings([]).average(), None);
    }
}
