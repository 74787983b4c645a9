//! Catalog service.

use std::time::Duration;

use async_trait::async_trait;
use lectern::catalog::slugify;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        data::{
            CourseStatusUpdate, NewCategory, NewCountry, NewCourse, NewTeacher, NewVariant,
            NewVariantItem,
        },
        records::{
            CategoryRecord, CountryRecord, CourseRecord, CourseUuid, TeacherRecord,
            VariantItemRecord, VariantItemUuid, VariantRecord,
        },
        repositories::{
            PgCategoriesRepository, PgCountriesRepository, PgCoursesRepository,
            PgCurriculumRepository, PgTeachersRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    teachers: PgTeachersRepository,
    categories: PgCategoriesRepository,
    courses: PgCoursesRepository,
    curriculum: PgCurriculumRepository,
    countries: PgCountriesRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            teachers: PgTeachersRepository::new(),
            categories: PgCategoriesRepository::new(),
            courses: PgCoursesRepository::new(),
            curriculum: PgCurriculumRepository::new(),
            countries: PgCountriesRepository::new(),
        }
    }
}

fn slug_for(title: &str, slug: Option<String>) -> Result<String, CatalogServiceError> {
    let slug = slug.unwrap_or_else(|| slugify(title));

    if slug.is_empty() {
        return Err(CatalogServiceError::EmptySlug);
    }

    Ok(slug)
}

#[async_trait]
impl CatalogService for PgCatalogService {
    #[tracing::instrument(
        name = "catalog.service.create_teacher",
        skip(self, teacher),
        fields(teacher_uuid = %teacher.uuid, user_uuid = %teacher.user_uuid),
        err
    )]
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<TeacherRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.teachers.create_teacher(&mut tx, teacher).await?;

        tx.commit().await?;

        info!(teacher_uuid = %created.uuid, "created teacher");

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.create_category",
        skip(self, category),
        fields(category_uuid = %category.uuid),
        err
    )]
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError> {
        let slug = slug_for(&category.title, category.slug)?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .categories
            .create_category(&mut tx, category.uuid, &category.title, &slug)
            .await?;

        tx.commit().await?;

        info!(category_uuid = %created.uuid, slug = %created.slug, "created category");

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.create_course",
        skip(self, course),
        fields(course_uuid = %course.uuid, price = course.price),
        err
    )]
    async fn create_course(&self, course: NewCourse) -> Result<CourseRecord, CatalogServiceError> {
        let slug = slug_for(&course.title, course.slug.clone())?;

        let mut tx = self.db.begin_transaction().await?;

        let created = self.courses.create_course(&mut tx, course, &slug).await?;

        tx.commit().await?;

        info!(course_uuid = %created.uuid, slug = %created.slug, "created course");

        Ok(created)
    }

    async fn get_course(&self, course: CourseUuid) -> Result<CourseRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let course = self.courses.get_course(&mut tx, course).await?;

        tx.commit().await?;

        Ok(course)
    }

    async fn list_published_courses(&self) -> Result<Vec<CourseRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let courses = self.courses.list_published_courses(&mut tx).await?;

        tx.commit().await?;

        Ok(courses)
    }

    #[tracing::instrument(
        name = "catalog.service.update_course_status",
        skip(self, update),
        fields(course_uuid = %course),
        err
    )]
    async fn update_course_status(
        &self,
        course: CourseUuid,
        update: CourseStatusUpdate,
    ) -> Result<CourseRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .courses
            .update_course_status(&mut tx, course, update)
            .await?;

        tx.commit().await?;

        info!(
            course_uuid = %updated.uuid,
            platform_status = %updated.platform_status,
            teacher_course_status = %updated.teacher_course_status,
            "updated course status"
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "catalog.service.add_variant",
        skip(self, variant),
        fields(variant_uuid = %variant.uuid, course_uuid = %variant.course_uuid),
        err
    )]
    async fn add_variant(&self, variant: NewVariant) -> Result<VariantRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.curriculum.create_variant(&mut tx, variant).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.add_variant_item",
        skip(self, item),
        fields(variant_item_uuid = %item.uuid, variant_uuid = %item.variant_uuid),
        err
    )]
    async fn add_variant_item(
        &self,
        item: NewVariantItem,
    ) -> Result<VariantItemRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.curriculum.create_variant_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.record_variant_item_duration",
        skip(self),
        fields(variant_item_uuid = %item, seconds = duration.as_secs()),
        err
    )]
    async fn record_variant_item_duration(
        &self,
        item: VariantItemUuid,
        duration: Duration,
    ) -> Result<VariantItemRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .curriculum
            .set_variant_item_duration(&mut tx, item, duration)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn get_curriculum(
        &self,
        course: CourseUuid,
    ) -> Result<Vec<VariantRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        // Surfaces NotFound for unknown courses rather than an empty curriculum.
        self.courses.get_course(&mut tx, course).await?;

        let variants = self.curriculum.get_curriculum(&mut tx, course).await?;

        tx.commit().await?;

        Ok(variants)
    }

    #[tracing::instrument(
        name = "catalog.service.create_country",
        skip(self, country),
        fields(country = %country.name, tax_rate = country.tax_rate),
        err
    )]
    async fn create_country(&self, country: NewCountry) -> Result<CountryRecord, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.countries.create_country(&mut tx, country).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn find_country(&self, name: &str) -> Result<Option<CountryRecord>, CatalogServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let country = self.countries.find_country(&mut tx, name).await?;

        tx.commit().await?;

        Ok(country)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Registers a user as a teacher.
    async fn create_teacher(&self, teacher: NewTeacher) -> Result<TeacherRecord, CatalogServiceError>;

    /// Creates a category, deriving its slug from the title when none is given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CatalogServiceError>;

    /// Creates a course, deriving its slug from the title when none is given.
    async fn create_course(&self, course: NewCourse) -> Result<CourseRecord, CatalogServiceError>;

    /// Retrieve a single course.
    async fn get_course(&self, course: CourseUuid) -> Result<CourseRecord, CatalogServiceError>;

    /// Courses published by both the platform and their teacher, featured first.
    async fn list_published_courses(&self) -> Result<Vec<CourseRecord>, CatalogServiceError>;

    /// Changes a course's status fields; every other field is fixed after creation.
    async fn update_course_status(
        &self,
        course: CourseUuid,
        update: CourseStatusUpdate,
    ) -> Result<CourseRecord, CatalogServiceError>;

    async fn add_variant(&self, variant: NewVariant) -> Result<VariantRecord, CatalogServiceError>;

    async fn add_variant_item(
        &self,
        item: NewVariantItem,
    ) -> Result<VariantItemRecord, CatalogServiceError>;

    /// Stores a lesson's measured duration and its `"{m}m {s}s"` display text.
    async fn record_variant_item_duration(
        &self,
        item: VariantItemUuid,
        duration: Duration,
    ) -> Result<VariantItemRecord, CatalogServiceError>;

    /// A course's variants with their items, in creation order.
    async fn get_curriculum(
        &self,
        course: CourseUuid,
    ) -> Result<Vec<VariantRecord>, CatalogServiceError>;

    async fn create_country(&self, country: NewCountry) -> Result<CountryRecord, CatalogServiceError>;

    /// Finds an active country by name.
    async fn find_country(&self, name: &str) -> Result<Option<CountryRecord>, CatalogServiceError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lectern::catalog::{PlatformStatus, TeacherCourseStatus};
    use testresult::TestResult;

    use crate::{
        domain::catalog::{
            data::{CourseStatusUpdate, NewCategory, NewVariant, NewVariantItem},
            records::{CategoryUuid, CourseUuid, VariantItemUuid, VariantUuid},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[test]
    fn slug_defaults_to_title() -> TestResult {
        assert_eq!(slug_for("Rust for Pythonistas", None)?, "rust-for-pythonistas");
        assert_eq!(slug_for("ignored", Some("custom".to_string()))?, "custom");

        Ok(())
    }

    #[test]
    fn punctuation_only_title_has_no_slug() {
        assert!(matches!(
            slug_for("???", None),
            Err(CatalogServiceError::EmptySlug)
        ));
    }

    #[tokio::test]
    async fn create_course_generates_slug() -> TestResult {
        let ctx = TestContext::new().await;
        let teacher = helpers::create_teacher(&ctx, "Ada Lovelace").await?;

        let course = helpers::create_course(&ctx, Some(teacher.uuid), "Analytical Engines", 50_00)
            .await?;

        assert_eq!(course.slug, "analytical-engines");
        assert_eq!(course.price, 50_00);
        assert_eq!(course.teacher_uuid, Some(teacher.uuid));
        assert_eq!(course.platform_status, PlatformStatus::Published);

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_course_slug_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_course(&ctx, None, "Same Title", 10_00).await?;
        let result = helpers::create_course(&ctx, None, "Same Title", 10_00).await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_course_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.catalog.get_course(CourseUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn course_with_unknown_category_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let mut course = helpers::new_course(None, "Orphan", 10_00);
        course.category_uuid = Some(CategoryUuid::new());

        let result = ctx.catalog.create_course(course).await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn status_update_only_touches_status_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let course = helpers::create_course(&ctx, None, "Status Course", 25_00).await?;

        let updated = ctx
            .catalog
            .update_course_status(
                course.uuid,
                CourseStatusUpdate {
                    platform_status: Some(PlatformStatus::Review),
                    teacher_course_status: None,
                    featured: Some(true),
                },
            )
            .await?;

        assert_eq!(updated.platform_status, PlatformStatus::Review);
        assert_eq!(updated.teacher_course_status, TeacherCourseStatus::Published);
        assert!(updated.featured);
        assert_eq!(updated.price, course.price);
        assert_eq!(updated.title, course.title);

        let published = ctx.catalog.list_published_courses().await?;

        assert!(published.iter().all(|listed| listed.uuid != course.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn curriculum_groups_items_under_variants() -> TestResult {
        let ctx = TestContext::new().await;
        let course = helpers::create_course(&ctx, None, "Curriculum Course", 25_00).await?;

        let variant = ctx
            .catalog
            .add_variant(NewVariant {
                uuid: VariantUuid::new(),
                course_uuid: course.uuid,
                title: "Getting Started".to_string(),
            })
            .await?;

        let item = ctx
            .catalog
            .add_variant_item(NewVariantItem {
                uuid: VariantItemUuid::new(),
                variant_uuid: variant.uuid,
                title: "Installing the toolchain".to_string(),
                description: None,
                preview: true,
            })
            .await?;

        assert!(item.content_duration.is_none());

        let item = ctx
            .catalog
            .record_variant_item_duration(item.uuid, Duration::from_secs(125))
            .await?;

        assert_eq!(item.duration_seconds, Some(125));
        assert_eq!(item.content_duration.as_deref(), Some("2m 5s"));

        let curriculum = ctx.catalog.get_curriculum(course.uuid).await?;

        assert_eq!(curriculum.len(), 1);
        assert_eq!(curriculum.first().map(|v| v.items.len()), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn category_slug_is_unique() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                title: "Web Development".to_string(),
                slug: None,
            })
            .await?;

        assert_eq!(category.slug, "web-development");

        let result = ctx
            .catalog
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                title: "Web development!".to_string(),
                slug: None,
            })
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn inactive_countries_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_country(&ctx, "Nigeria", 7).await?;

        let found = ctx.catalog.find_country("Nigeria").await?;

        assert_eq!(found.map(|country| country.tax_rate), Some(7));
        assert!(ctx.catalog.find_country("Atlantis").await?.is_none());

        Ok(())
    }
}
