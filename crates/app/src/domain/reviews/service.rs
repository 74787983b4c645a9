//! Reviews service.

use async_trait::async_trait;
use lectern::{
    notifications::NotificationKind,
    reviews::{RatingSummary, check_rating},
};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::{records::CourseUuid, repositories::PgCoursesRepository},
        notifications::{
            data::NewNotification, records::NotificationUuid,
            repositories::PgNotificationsRepository,
        },
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{CourseRating, ReviewRecord, ReviewUuid},
            repositories::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    reviews_repository: PgReviewsRepository,
    courses_repository: PgCoursesRepository,
    notifications_repository: PgNotificationsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            reviews_repository: PgReviewsRepository::new(),
            courses_repository: PgCoursesRepository::new(),
            notifications_repository: PgNotificationsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    #[tracing::instrument(
        name = "reviews.service.create_review",
        skip(self, review),
        fields(
            review_uuid = %review.uuid,
            course_uuid = %review.course_uuid,
            rating = review.rating
        ),
        err
    )]
    async fn create_review(&self, review: NewReview) -> Result<ReviewRecord, ReviewsServiceError> {
        check_rating(review.rating)?;

        let mut tx = self.db.begin_transaction().await?;

        if !self
            .reviews_repository
            .is_enrolled(&mut tx, review.user_uuid, review.course_uuid)
            .await?
        {
            return Err(ReviewsServiceError::NotEnrolled);
        }

        let course = self
            .courses_repository
            .get_course(&mut tx, review.course_uuid)
            .await?;

        let created = self.reviews_repository.create_review(&mut tx, review).await?;

        if let Some(teacher) = course.teacher_uuid {
            self.notifications_repository
                .create_notification(
                    &mut tx,
                    NewNotification {
                        uuid: NotificationUuid::new(),
                        user_uuid: None,
                        teacher_uuid: Some(teacher),
                        order_uuid: None,
                        order_item_uuid: None,
                        review_uuid: Some(created.uuid),
                        kind: NotificationKind::NewReview,
                    },
                )
                .await?;
        }

        tx.commit().await?;

        info!(notified = course.teacher_uuid.is_some(), "created review");

        Ok(created)
    }

    async fn list_course_reviews(
        &self,
        course: CourseUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let reviews = self
            .reviews_repository
            .list_course_reviews(&mut tx, course)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn course_rating(&self, course: CourseUuid) -> Result<CourseRating, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Unknown courses are not found rather than unrated.
        self.courses_repository.get_course(&mut tx, course).await?;

        let summary: RatingSummary = self
            .reviews_repository
            .course_rating(&mut tx, course)
            .await?;

        tx.commit().await?;

        Ok(CourseRating {
            course_uuid: course,
            rating_count: summary.count,
            average_rating: summary.average(),
        })
    }

    #[tracing::instrument(
        name = "reviews.service.set_review_active",
        skip(self),
        fields(review_uuid = %review),
        err
    )]
    async fn set_review_active(
        &self,
        review: ReviewUuid,
        active: bool,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self.reviews_repository.set_active(&mut tx, review, active).await?;

        tx.commit().await?;

        info!(active, "moderated review");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "reviews.service.reply_to_review",
        skip(self, reply),
        fields(review_uuid = %review),
        err
    )]
    async fn reply_to_review(
        &self,
        review: ReviewUuid,
        reply: String,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        if reply.trim().is_empty() {
            return Err(ReviewsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_transaction().await?;

        let updated = self.reviews_repository.reply(&mut tx, review, &reply).await?;

        tx.commit().await?;

        info!("replied to review");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Records a student's review of a course they are enrolled in.
    ///
    /// The course teacher, when there is one, gets a "New Review" notification. A student
    /// can review each course once.
    async fn create_review(&self, review: NewReview) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Active reviews of a course, newest first.
    async fn list_course_reviews(
        &self,
        course: CourseUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    /// Count and average of the course's active ratings.
    async fn course_rating(&self, course: CourseUuid) -> Result<CourseRating, ReviewsServiceError>;

    /// Shows or hides a review.
    async fn set_review_active(
        &self,
        review: ReviewUuid,
        active: bool,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Sets the teacher's reply, replacing any earlier one.
    async fn reply_to_review(
        &self,
        review: ReviewUuid,
        reply: String,
    ) -> Result<ReviewRecord, ReviewsServiceError>;
}
