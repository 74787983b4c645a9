//! Reviews service errors.

use lectern::reviews::InvalidRating;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("course already reviewed")]
    AlreadyExists,

    #[error("review or course not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("only enrolled students can review a course")]
    NotEnrolled,

    #[error(transparent)]
    InvalidRating(#[from] InvalidRating),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ReviewsServiceError {
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
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            ReviewsServiceError::from(Error::RowNotFound),
            ReviewsServiceError::NotFound
        ));
    }

    #[test]
    fn invalid_rating_keeps_the_value() {
        let error = ReviewsServiceError::from(InvalidRating(9));

        assert_eq!(error.to_string(), "rating 9 is outside 1..=5");
    }
}
