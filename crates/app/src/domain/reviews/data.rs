//! Review Data

use crate::domain::{catalog::records::CourseUuid, reviews::records::ReviewUuid, users::UserUuid};

/// New Review Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub user_uuid: UserUuid,
    pub course_uuid: CourseUuid,
    pub review: String,
    pub rating: u32,
}
