//! Curriculum Repository
//!
//! Variants (sections) and variant items (lessons) of a course.

use std::time::Duration;

use lectern::catalog::content_duration;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    catalog::{
        data::{NewVariant, NewVariantItem},
        records::{CourseUuid, VariantItemRecord, VariantItemUuid, VariantRecord},
    },
    columns::{amount_param, try_get_timestamp, try_get_uuid},
};

const CREATE_VARIANT_SQL: &str = include_str!("../sql/create_variant.sql");
const LIST_VARIANTS_SQL: &str = include_str!("../sql/list_variants.sql");
const CREATE_VARIANT_ITEM_SQL: &str = include_str!("../sql/create_variant_item.sql");
const SET_VARIANT_ITEM_DURATION_SQL: &str = include_str!("../sql/set_variant_item_duration.sql");
const LIST_COURSE_VARIANT_ITEMS_SQL: &str = include_str!("../sql/list_course_variant_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCurriculumRepository;

impl PgCurriculumRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewVariant,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.course_uuid.into_uuid())
            .bind(variant.title)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewVariantItem,
    ) -> Result<VariantItemRecord, sqlx::Error> {
        query_as::<Postgres, VariantItemRecord>(CREATE_VARIANT_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.variant_uuid.into_uuid())
            .bind(item.title)
            .bind(item.description)
            .bind(item.preview)
            .fetch_one(&mut **tx)
            .await
    }

    /// Stores a measured lesson duration along with its display text.
    pub(crate) async fn set_variant_item_duration(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: VariantItemUuid,
        duration: Duration,
    ) -> Result<VariantItemRecord, sqlx::Error> {
        query_as::<Postgres, VariantItemRecord>(SET_VARIANT_ITEM_DURATION_SQL)
            .bind(item.into_uuid())
            .bind(amount_param(duration.as_secs(), "duration_seconds")?)
            .bind(content_duration(duration))
            .fetch_one(&mut **tx)
            .await
    }

    /// Loads a course's variants with their items attached, both in creation order.
    pub(crate) async fn get_curriculum(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        course: CourseUuid,
    ) -> Result<Vec<VariantRecord>, sqlx::Error> {
        let mut variants = query_as::<Postgres, VariantRecord>(LIST_VARIANTS_SQL)
            .bind(course.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        let items = query_as::<Postgres, VariantItemRecord>(LIST_COURSE_VARIANT_ITEMS_SQL)
            .bind(course.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        for item in items {
            if let Some(variant) = variants
                .iter_mut()
                .find(|variant| variant.uuid == item.variant_uuid)
            {
                variant.items.push(item);
            }
        }

        Ok(variants)
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            title: row.try_get("title")?,
            items: Vec::new(),
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let duration_seconds = row
            .try_get::<Option<i64>, _>("duration_seconds")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "duration_seconds".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            variant_uuid: try_get_uuid(row, "variant_uuid")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            duration_seconds,
            content_duration: row.try_get("content_duration")?,
            preview: row.try_get("preview")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
