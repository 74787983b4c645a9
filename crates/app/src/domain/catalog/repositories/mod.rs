//! Catalog Repositories

mod categories;
mod countries;
mod courses;
mod curriculum;
mod teachers;

pub(crate) use categories::PgCategoriesRepository;
pub(crate) use countries::PgCountriesRepository;
pub(crate) use courses::PgCoursesRepository;
pub(crate) use curriculum::PgCurriculumRepository;
pub(crate) use teachers::PgTeachersRepository;
