//! Reviews Repositories

mod reviews;

pub(crate) use reviews::PgReviewsRepository;
