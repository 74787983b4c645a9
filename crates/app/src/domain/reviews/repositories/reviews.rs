//! Reviews Repository

use lectern::reviews::RatingSummary;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::{
    catalog::records::CourseUuid,
    columns::{rating_param, try_get_count, try_get_rating, try_get_timestamp, try_get_uuid},
    reviews::{
        data::NewReview,
        records::{ReviewRecord, ReviewUuid},
    },
    users::UserUuid,
};

const CREATE_REVIEW_SQL: &str = include_str!("../sql/create_review.sql");
const LIST_COURSE_REVIEWS_SQL: &str = include_str!("../sql/list_course_reviews.sql");
const COURSE_RATING_SQL: &str = include_str!("../sql/course_rating.sql");
const SET_REVIEW_ACTIVE_SQL: &str = include_str!("../sql/set_review_active.sql");
const REPLY_TO_REVIEW_SQL: &str = include_str!("../sql/reply_to_review.sql");
const USER_ENROLLED_IN_COURSE_SQL: &str = include_str!("../sql/user_enrolled_in_course.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: NewReview,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.user_uuid.into_uuid())
            .bind(review.course_uuid.into_uuid())
            .bind(review.review)
            .bind(rating_param(review.rating, "rating")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_course_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(LIST_COURSE_REVIEWS_SQL)
            .bind(course.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Count and sum of the course's active ratings.
    pub(crate) async fn course_rating(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<RatingSummary, sqlx::Error> {
        let row = sqlx::query(COURSE_RATING_SQL)
            .bind(course.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(RatingSummary {
            count: try_get_count(&row, "rating_count")?,
            sum: try_get_count(&row, "rating_sum")?,
        })
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        active: bool,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(SET_REVIEW_ACTIVE_SQL)
            .bind(review.into_uuid())
            .bind(active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn reply(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
        reply: &str,
    ) -> Result<ReviewRecord, sqlx::Error> {
        query_as::<Postgres, ReviewRecord>(REPLY_TO_REVIEW_SQL)
            .bind(review.into_uuid())
            .bind(reply)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn is_enrolled(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        course: CourseUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(USER_ENROLLED_IN_COURSE_SQL)
            .bind(user.into_uuid())
            .bind(course.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ReviewRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            user_uuid: try_get_uuid(row, "user_uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            review: row.try_get("review")?,
            rating: try_get_rating(row, "rating")?,
            reply: row.try_get("reply")?,
            active: row.try_get("active")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
