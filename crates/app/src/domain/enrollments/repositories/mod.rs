//! Enrollment Repositories

mod enrollments;

pub(crate) use enrollments::PgEnrollmentsRepository;
