use clap::{Args, Subcommand};
use lectern_app::domain::{
    catalog::records::CourseUuid,
    reviews::{ReviewsService, data::NewReview, records::ReviewUuid},
    users::UserUuid,
};

use super::output::{error_chain, to_json};

#[derive(Debug, Args)]
pub(crate) struct ReviewCommand {
    #[command(subcommand)]
    command: ReviewSubcommand,
}

#[derive(Debug, Subcommand)]
enum ReviewSubcommand {
    /// Review a course the student is enrolled in
    Create(CreateArgs),

    /// List a course's visible reviews
    List(CourseArgs),

    /// Show a course's review count and average rating
    Rating(CourseArgs),

    /// Hide a review from listings and the rating
    Hide(ReviewArgs),

    /// Make a hidden review visible again
    Show(ReviewArgs),

    /// Set the teacher's reply to a review
    Reply(ReplyArgs),
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long)]
    user_uuid: UserUuid,

    #[arg(long)]
    course_uuid: CourseUuid,

    /// Stars from 1 to 5
    #[arg(long)]
    rating: u32,

    #[arg(long)]
    review: String,
}

#[derive(Debug, Args)]
struct CourseArgs {
    course_uuid: CourseUuid,
}

#[derive(Debug, Args)]
struct ReviewArgs {
    review_uuid: ReviewUuid,
}

#[derive(Debug, Args)]
struct ReplyArgs {
    review_uuid: ReviewUuid,

    #[arg(long)]
    reply: String,
}

pub(crate) async fn run(
    command: ReviewCommand,
    reviews: &dyn ReviewsService,
) -> Result<String, String> {
    match command.command {
        ReviewSubcommand::Create(args) => {
            let review = reviews
                .create_review(NewReview {
                    uuid: ReviewUuid::new(),
                    user_uuid: args.user_uuid,
                    course_uuid: args.course_uuid,
                    review: args.review,
                    rating: args.rating,
                })
                .await
                .map_err(|error| format!("failed to create review: {}", error_chain(&error)))?;

            to_json(&review)
        }
        ReviewSubcommand::List(args) => {
            let list = reviews
                .list_course_reviews(args.course_uuid)
                .await
                .map_err(|error| format!("failed to list reviews: {}", error_chain(&error)))?;

            to_json(&list)
        }
        ReviewSubcommand::Rating(args) => {
            let rating = reviews
                .course_rating(args.course_uuid)
                .await
                .map_err(|error| format!("failed to get course rating: {}", error_chain(&error)))?;

            to_json(&rating)
        }
        ReviewSubcommand::Hide(args) => set_active(reviews, args.review_uuid, false).await,
        ReviewSubcommand::Show(args) => set_active(reviews, args.review_uuid, true).await,
        ReviewSubcommand::Reply(args) => {
            let review = reviews
                .reply_to_review(args.review_uuid, args.reply)
                .await
                .map_err(|error| format!("failed to reply to review: {}", error_chain(&error)))?;

            to_json(&review)
        }
    }
}

async fn set_active(
    reviews: &dyn ReviewsService,
    review: ReviewUuid,
    active: bool,
) -> Result<String, String> {
    let review = reviews
        .set_review_active(review, active)
        .await
        .map_err(|error| format!("failed to moderate review: {}", error_chain(&error)))?;

    to_json(&review)
}

#[cfg(test)]
mod tests {
    use lectern::reviews::InvalidRating;
    use lectern_app::domain::reviews::{MockReviewsService, ReviewsServiceError};

    use super::*;

    #[tokio::test]
    async fn out_of_range_rating_is_reported() {
        let mut reviews = MockReviewsService::new();
        let course = CourseUuid::new();

        reviews
            .expect_create_review()
            .withf(move |review| review.course_uuid == course && review.rating == 7)
            .times(1)
            .returning(|review| Err(ReviewsServiceError::from(InvalidRating(review.rating))));

        let command = ReviewCommand {
            command: ReviewSubcommand::Create(CreateArgs {
                user_uuid: UserUuid::new(),
                course_uuid: course,
                rating: 7,
                review: "Too good".to_string(),
            }),
        };

        let result = run(command, &reviews).await;

        assert_eq!(
            result,
            Err("failed to create review: rating 7 is outside 1..=5".to_string())
        );
    }

    #[tokio::test]
    async fn hide_deactivates_the_review() {
        let mut reviews = MockReviewsService::new();
        let review = ReviewUuid::new();

        reviews
            .expect_set_review_active()
            .withf(move |requested, active| *requested == review && !*active)
            .times(1)
            .returning(|_, _| Err(ReviewsServiceError::NotFound));

        let command = ReviewCommand {
            command: ReviewSubcommand::Hide(ReviewArgs {
                review_uuid: review,
            }),
        };

        let result = run(command, &reviews).await;

        assert_eq!(
            result,
            Err("failed to moderate review: review or course not found".to_string())
        );
    }
}
