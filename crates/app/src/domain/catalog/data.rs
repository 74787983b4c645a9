//! Catalog Data

use lectern::catalog::{Language, Level, PlatformStatus, TeacherCourseStatus};

use crate::domain::{
    catalog::records::{
        CategoryUuid, CountryUuid, CourseUuid, TeacherUuid, VariantItemUuid, VariantUuid,
    },
    users::UserUuid,
};

/// New Teacher Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub uuid: TeacherUuid,
    pub user_uuid: UserUuid,
    pub full_name: String,
}

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub title: String,

    /// Generated from the title when omitted.
    pub slug: Option<String>,
}

/// New Course Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub uuid: CourseUuid,
    pub category_uuid: Option<CategoryUuid>,
    pub teacher_uuid: Option<TeacherUuid>,
    pub title: String,
    pub description: Option<String>,
    pub price: u64,
    pub language: Language,
    pub level: Level,
    pub platform_status: PlatformStatus,
    pub teacher_course_status: TeacherCourseStatus,
    pub featured: bool,

    /// Generated from the title when omitted.
    pub slug: Option<String>,
}

/// Course Status Update Data
///
/// Published courses only change through these fields; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseStatusUpdate {
    pub platform_status: Option<PlatformStatus>,
    pub teacher_course_status: Option<TeacherCourseStatus>,
    pub featured: Option<bool>,
}

/// New Variant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariant {
    pub uuid: VariantUuid,
    pub course_uuid: CourseUuid,
    pub title: String,
}

/// New Variant Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVariantItem {
    pub uuid: VariantItemUuid,
    pub variant_uuid: VariantUuid,
    pub title: String,
    pub description: Option<String>,
    pub preview: bool,
}

/// New Country Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountry {
    pub uuid: CountryUuid,
    pub name: String,
    pub tax_rate: u32,
    pub active: bool,
}
