//! Teachers Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{data::NewTeacher, records::TeacherRecord},
    columns::{try_get_timestamp, try_get_uuid},
};

const CREATE_TEACHER_SQL: &str = include_str!("../sql/create_teacher.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTeachersRepository;

impl PgTeachersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_teacher(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        teacher: NewTeacher,
    ) -> Result<TeacherRecord, sqlx::Error> {
        query_as::<Postgres, TeacherRecord>(CREATE_TEACHER_SQL)
            .bind(teacher.uuid.into_uuid())
            .bind(teacher.user_uuid.into_uuid())
            .bind(teacher.full_name)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for TeacherRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            user_uuid: try_get_uuid(row, "user_uuid")?,
            full_name: row.try_get("full_name")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
