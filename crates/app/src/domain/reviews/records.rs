//! Review Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{catalog::records::CourseUuid, users::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

/// Review Record
///
/// At most one per student and course. Inactive reviews are hidden from listings and
/// the course rating.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub course_uuid: CourseUuid,
    pub review: String,

    /// Stars from 1 to 5.
    pub rating: u32,

    /// The teacher's answer.
    pub reply: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Course Rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseRating {
    pub course_uuid: CourseUuid,

    /// Number of active reviews.
    pub rating_count: u64,

    /// Mean of the active ratings, rounded to two places.
    pub average_rating: Option<f64>,
}
