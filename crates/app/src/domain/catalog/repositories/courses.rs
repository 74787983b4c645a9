//! Courses Repository

use lectern::catalog::{PlatformStatus, TeacherCourseStatus};
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{
        data::{CourseStatusUpdate, NewCourse},
        records::{CategoryUuid, CourseRecord, CourseUuid, TeacherUuid},
    },
    columns::{
        amount_param, try_get_amount, try_get_optional_uuid, try_get_parsed, try_get_timestamp,
        try_get_uuid,
    },
};

const CREATE_COURSE_SQL: &str = include_str!("../sql/create_course.sql");
const GET_COURSE_SQL: &str = include_str!("../sql/get_course.sql");
const LIST_PUBLISHED_COURSES_SQL: &str = include_str!("../sql/list_published_courses.sql");
const UPDATE_COURSE_STATUS_SQL: &str = include_str!("../sql/update_course_status.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCoursesRepository;

impl PgCoursesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_course(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: NewCourse,
        slug: &str,
    ) -> Result<CourseRecord, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(CREATE_COURSE_SQL)
            .bind(course.uuid.into_uuid())
            .bind(course.category_uuid.map(CategoryUuid::into_uuid))
            .bind(course.teacher_uuid.map(TeacherUuid::into_uuid))
            .bind(course.title)
            .bind(course.description)
            .bind(amount_param(course.price, "price")?)
            .bind(course.language.as_str())
            .bind(course.level.as_str())
            .bind(course.platform_status.as_str())
            .bind(course.teacher_course_status.as_str())
            .bind(course.featured)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_course(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<CourseRecord, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(GET_COURSE_SQL)
            .bind(course.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_published_courses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CourseRecord>, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(LIST_PUBLISHED_COURSES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_course_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
        update: CourseStatusUpdate,
    ) -> Result<CourseRecord, sqlx::Error> {
        query_as::<Postgres, CourseRecord>(UPDATE_COURSE_STATUS_SQL)
            .bind(course.into_uuid())
            .bind(update.platform_status.map(PlatformStatus::as_str))
            .bind(update.teacher_course_status.map(TeacherCourseStatus::as_str))
            .bind(update.featured)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CourseRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            category_uuid: try_get_optional_uuid(row, "category_uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            language: try_get_parsed(row, "language")?,
            level: try_get_parsed(row, "level")?,
            platform_status: try_get_parsed(row, "platform_status")?,
            teacher_course_status: try_get_parsed(row, "teacher_course_status")?,
            featured: row.try_get("featured")?,
            slug: row.try_get("slug")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
