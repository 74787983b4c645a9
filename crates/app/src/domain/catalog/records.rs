//! Catalog Records

use jiff::Timestamp;
use lectern::catalog::{Language, Level, PlatformStatus, TeacherCourseStatus};
use serde::Serialize;

use crate::{domain::users::UserUuid, uuids::TypedUuid};

/// Teacher UUID
pub type TeacherUuid = TypedUuid<TeacherRecord>;

/// Teacher Record
#[derive(Debug, Clone, Serialize)]
pub struct TeacherRecord {
    pub uuid: TeacherUuid,
    pub user_uuid: UserUuid,
    pub full_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,
    pub title: String,
    pub slug: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Course UUID
pub type CourseUuid = TypedUuid<CourseRecord>;

/// Course Record
#[derive(Debug, Clone, Serialize)]
pub struct CourseRecord {
    pub uuid: CourseUuid,
    pub category_uuid: Option<CategoryUuid>,
    pub teacher_uuid: Option<TeacherUuid>,
    pub title: String,
    pub description: Option<String>,

    /// Price in minor units.
    pub price: u64,
    pub language: Language,
    pub level: Level,
    pub platform_status: PlatformStatus,
    pub teacher_course_status: TeacherCourseStatus,
    pub featured: bool,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Variant UUID
pub type VariantUuid = TypedUuid<VariantRecord>;

/// Variant (curriculum section) Record
#[derive(Debug, Clone, Serialize)]
pub struct VariantRecord {
    pub uuid: VariantUuid,
    pub course_uuid: CourseUuid,
    pub title: String,
    pub items: Vec<VariantItemRecord>,
    pub created_at: Timestamp,
}

/// Variant Item UUID
pub type VariantItemUuid = TypedUuid<VariantItemRecord>;

/// Variant Item (lesson) Record
#[derive(Debug, Clone, Serialize)]
pub struct VariantItemRecord {
    pub uuid: VariantItemUuid,
    pub variant_uuid: VariantUuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_seconds: Option<u64>,

    /// Display text such as `"12m 5s"`.
    pub content_duration: Option<String>,
    pub preview: bool,
    pub created_at: Timestamp,
}

/// Country UUID
pub type CountryUuid = TypedUuid<CountryRecord>;

/// Country Record
#[derive(Debug, Clone, Serialize)]
pub struct CountryRecord {
    pub uuid: CountryUuid,
    pub name: String,

    /// Tax rate percentage applied to cart lines.
    pub tax_rate: u32,
    pub active: bool,
}
