use std::time::Duration;

use clap::{Args, Subcommand};
use lectern::catalog::{Language, Level, PlatformStatus, TeacherCourseStatus};
use lectern_app::domain::{
    catalog::{
        CatalogService,
        data::{
            CourseStatusUpdate, NewCategory, NewCountry, NewCourse, NewTeacher, NewVariant,
            NewVariantItem,
        },
        records::{
            CategoryUuid, CountryUuid, CourseUuid, TeacherUuid, VariantItemUuid, VariantUuid,
        },
    },
    users::UserUuid,
};

use super::output::to_json;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Register a user as a teacher
    CreateTeacher(CreateTeacherArgs),

    /// Create a course category
    CreateCategory(CreateCategoryArgs),

    /// Create a course
    CreateCourse(CreateCourseArgs),

    /// Show a course
    GetCourse(CourseArgs),

    /// List published courses, featured first
    ListCourses,

    /// Change a course's status fields
    UpdateCourseStatus(UpdateCourseStatusArgs),

    /// Add a curriculum section to a course
    AddVariant(AddVariantArgs),

    /// Add a lesson to a curriculum section
    AddVariantItem(AddVariantItemArgs),

    /// Record the measured duration of a lesson
    RecordDuration(RecordDurationArgs),

    /// Show a course's curriculum
    Curriculum(CourseArgs),

    /// Create a country with its tax rate
    CreateCountry(CreateCountryArgs),

    /// Find an active country by name
    FindCountry(FindCountryArgs),
}

#[derive(Debug, Args)]
struct CreateTeacherArgs {
    /// Identity store UUID of the user
    #[arg(long)]
    user_uuid: UserUuid,

    #[arg(long)]
    full_name: String,

    /// Optional teacher UUID; generated when omitted
    #[arg(long)]
    teacher_uuid: Option<TeacherUuid>,
}

#[derive(Debug, Args)]
struct CreateCategoryArgs {
    #[arg(long)]
    title: String,

    /// Generated from the title when omitted
    #[arg(long)]
    slug: Option<String>,
}

#[derive(Debug, Args)]
struct CreateCourseArgs {
    #[arg(long)]
    title: String,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    #[arg(long)]
    teacher_uuid: Option<TeacherUuid>,

    #[arg(long)]
    category_uuid: Option<CategoryUuid>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long, default_value_t = Language::default())]
    language: Language,

    #[arg(long, default_value_t = Level::default())]
    level: Level,

    #[arg(long, default_value_t = PlatformStatus::default())]
    platform_status: PlatformStatus,

    #[arg(long, default_value_t = TeacherCourseStatus::default())]
    teacher_course_status: TeacherCourseStatus,

    #[arg(long)]
    featured: bool,

    /// Generated from the title when omitted
    #[arg(long)]
    slug: Option<String>,
}

#[derive(Debug, Args)]
struct CourseArgs {
    course_uuid: CourseUuid,
}

#[derive(Debug, Args)]
struct UpdateCourseStatusArgs {
    course_uuid: CourseUuid,

    #[arg(long)]
    platform_status: Option<PlatformStatus>,

    #[arg(long)]
    teacher_course_status: Option<TeacherCourseStatus>,

    #[arg(long)]
    featured: Option<bool>,
}

#[derive(Debug, Args)]
struct AddVariantArgs {
    #[arg(long)]
    course_uuid: CourseUuid,

    #[arg(long)]
    title: String,
}

#[derive(Debug, Args)]
struct AddVariantItemArgs {
    #[arg(long)]
    variant_uuid: VariantUuid,

    #[arg(long)]
    title: String,

    #[arg(long)]
    description: Option<String>,

    /// Lesson can be watched before purchase
    #[arg(long)]
    preview: bool,
}

#[derive(Debug, Args)]
struct RecordDurationArgs {
    variant_item_uuid: VariantItemUuid,

    /// Measured length of the lesson media
    #[arg(long)]
    seconds: u64,
}

#[derive(Debug, Args)]
struct CreateCountryArgs {
    #[arg(long)]
    name: String,

    /// Tax rate percentage (0-100)
    #[arg(long, default_value_t = 5)]
    tax_rate: u32,

    /// Create the country switched off
    #[arg(long)]
    inactive: bool,
}

#[derive(Debug, Args)]
struct FindCountryArgs {
    name: String,
}

pub(crate) async fn run(
    command: CatalogCommand,
    catalog: &dyn CatalogService,
) -> Result<String, String> {
    match command.command {
        CatalogSubcommand::CreateTeacher(args) => {
            let teacher = catalog
                .create_teacher(NewTeacher {
                    uuid: args.teacher_uuid.unwrap_or_default(),
                    user_uuid: args.user_uuid,
                    full_name: args.full_name,
                })
                .await
                .map_err(|error| format!("failed to create teacher: {error}"))?;

            to_json(&teacher)
        }
        CatalogSubcommand::CreateCategory(args) => {
            let category = catalog
                .create_category(NewCategory {
                    uuid: CategoryUuid::new(),
                    title: args.title,
                    slug: args.slug,
                })
                .await
                .map_err(|error| format!("failed to create category: {error}"))?;

            to_json(&category)
        }
        CatalogSubcommand::CreateCourse(args) => {
            let course = catalog
                .create_course(NewCourse {
                    uuid: CourseUuid::new(),
                    category_uuid: args.category_uuid,
                    teacher_uuid: args.teacher_uuid,
                    title: args.title,
                    description: args.description,
                    price: args.price,
                    language: args.language,
                    level: args.level,
                    platform_status: args.platform_status,
                    teacher_course_status: args.teacher_course_status,
                    featured: args.featured,
                    slug: args.slug,
                })
                .await
                .map_err(|error| format!("failed to create course: {error}"))?;

            to_json(&course)
        }
        CatalogSubcommand::GetCourse(args) => {
            let course = catalog
                .get_course(args.course_uuid)
                .await
                .map_err(|error| format!("failed to get course: {error}"))?;

            to_json(&course)
        }
        CatalogSubcommand::ListCourses => {
            let courses = catalog
                .list_published_courses()
                .await
                .map_err(|error| format!("failed to list courses: {error}"))?;

            to_json(&courses)
        }
        CatalogSubcommand::UpdateCourseStatus(args) => {
            let course = catalog
                .update_course_status(
                    args.course_uuid,
                    CourseStatusUpdate {
                        platform_status: args.platform_status,
                        teacher_course_status: args.teacher_course_status,
                        featured: args.featured,
                    },
                )
                .await
                .map_err(|error| format!("failed to update course status: {error}"))?;

            to_json(&course)
        }
        CatalogSubcommand::AddVariant(args) => {
            let variant = catalog
                .add_variant(NewVariant {
                    uuid: VariantUuid::new(),
                    course_uuid: args.course_uuid,
                    title: args.title,
                })
                .await
                .map_err(|error| format!("failed to add variant: {error}"))?;

            to_json(&variant)
        }
        CatalogSubcommand::AddVariantItem(args) => {
            let item = catalog
                .add_variant_item(NewVariantItem {
                    uuid: VariantItemUuid::new(),
                    variant_uuid: args.variant_uuid,
                    title: args.title,
                    description: args.description,
                    preview: args.preview,
                })
                .await
                .map_err(|error| format!("failed to add variant item: {error}"))?;

            to_json(&item)
        }
        CatalogSubcommand::RecordDuration(args) => {
            let item = catalog
                .record_variant_item_duration(
                    args.variant_item_uuid,
                    Duration::from_secs(args.seconds),
                )
                .await
                .map_err(|error| format!("failed to record duration: {error}"))?;

            to_json(&item)
        }
        CatalogSubcommand::Curriculum(args) => {
            let curriculum = catalog
                .get_curriculum(args.course_uuid)
                .await
                .map_err(|error| format!("failed to get curriculum: {error}"))?;

            to_json(&curriculum)
        }
        CatalogSubcommand::CreateCountry(args) => {
            let country = catalog
                .create_country(NewCountry {
                    uuid: CountryUuid::new(),
                    name: args.name,
                    tax_rate: args.tax_rate,
                    active: !args.inactive,
                })
                .await
                .map_err(|error| format!("failed to create country: {error}"))?;

            to_json(&country)
        }
        CatalogSubcommand::FindCountry(args) => {
            let country = catalog
                .find_country(&args.name)
                .await
                .map_err(|error| format!("failed to find country: {error}"))?
                .ok_or_else(|| format!("no active country named {:?}", args.name))?;

            to_json(&country)
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use lectern_app::domain::catalog::{
        CatalogServiceError, MockCatalogService,
        records::{CourseRecord, VariantItemRecord},
    };
    use testresult::TestResult;

    use super::*;

    fn course_record(course: NewCourse, slug: &str) -> CourseRecord {
        CourseRecord {
            uuid: course.uuid,
            category_uuid: course.category_uuid,
            teacher_uuid: course.teacher_uuid,
            title: course.title,
            description: course.description,
            price: course.price,
            language: course.language,
            level: course.level,
            platform_status: course.platform_status,
            teacher_course_status: course.teacher_course_status,
            featured: course.featured,
            slug: slug.to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn create_course_passes_defaults_and_prints_json() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_create_course()
            .withf(|course| {
                course.price == 49_99
                    && course.language == Language::English
                    && course.platform_status == PlatformStatus::Published
                    && course.slug.is_none()
            })
            .times(1)
            .returning(|course| Ok(course_record(course, "intro-to-rust")));

        let command = CatalogCommand {
            command: CatalogSubcommand::CreateCourse(CreateCourseArgs {
                title: "Intro to Rust".to_string(),
                price: 49_99,
                teacher_uuid: None,
                category_uuid: None,
                description: None,
                language: Language::default(),
                level: Level::default(),
                platform_status: PlatformStatus::default(),
                teacher_course_status: TeacherCourseStatus::default(),
                featured: false,
                slug: None,
            }),
        };

        let output = run(command, &catalog).await?;
        let json: serde_json::Value = serde_json::from_str(&output)?;

        assert_eq!(json["slug"], "intro-to-rust");
        assert_eq!(json["price"], 4999);

        Ok(())
    }

    #[tokio::test]
    async fn record_duration_converts_seconds() -> TestResult {
        let mut catalog = MockCatalogService::new();
        let item_uuid = VariantItemUuid::new();

        catalog
            .expect_record_variant_item_duration()
            .withf(move |item, duration| *item == item_uuid && duration.as_secs() == 125)
            .times(1)
            .returning(|item, duration| {
                Ok(VariantItemRecord {
                    uuid: item,
                    variant_uuid: VariantUuid::new(),
                    title: "Lesson".to_string(),
                    description: None,
                    duration_seconds: Some(duration.as_secs()),
                    content_duration: Some("2m 5s".to_string()),
                    preview: false,
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let command = CatalogCommand {
            command: CatalogSubcommand::RecordDuration(RecordDurationArgs {
                variant_item_uuid: item_uuid,
                seconds: 125,
            }),
        };

        let output = run(command, &catalog).await?;

        assert!(output.contains("\"2m 5s\""));

        Ok(())
    }

    #[tokio::test]
    async fn missing_country_is_an_error() {
        let mut catalog = MockCatalogService::new();

        catalog.expect_find_country().returning(|_| Ok(None));

        let command = CatalogCommand {
            command: CatalogSubcommand::FindCountry(FindCountryArgs {
                name: "Atlantis".to_string(),
            }),
        };

        let result = run(command, &catalog).await;

        assert_eq!(result, Err("no active country named \"Atlantis\"".to_string()));
    }

    #[tokio::test]
    async fn service_errors_are_reported() {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_course()
            .returning(|_| Err(CatalogServiceError::NotFound));

        let command = CatalogCommand {
            command: CatalogSubcommand::GetCourse(CourseArgs {
                course_uuid: CourseUuid::new(),
            }),
        };

        let result = run(command, &catalog).await;

        assert_eq!(
            result,
            Err("failed to get course: catalog record not found".to_string())
        );
    }
}
