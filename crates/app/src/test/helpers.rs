//! Test Helpers

use lectern::catalog::{Language, Level, PlatformStatus, TeacherCourseStatus};

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid},
        },
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewCountry, NewCourse, NewTeacher},
            records::{
                CountryRecord, CountryUuid, CourseRecord, CourseUuid, TeacherRecord, TeacherUuid,
            },
        },
        coupons::{
            CouponsService, CouponsServiceError,
            data::NewCoupon,
            records::{CouponRecord, CouponUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::NewOrder,
            records::{OrderRecord, OrderUuid},
        },
        users::UserUuid,
    },
    test::TestContext,
};

pub(crate) async fn create_teacher(
    ctx: &TestContext,
    full_name: &str,
) -> Result<TeacherRecord, CatalogServiceError> {
    ctx.catalog
        .create_teacher(NewTeacher {
            uuid: TeacherUuid::new(),
            user_uuid: UserUuid::new(),
            full_name: full_name.to_string(),
        })
        .await
}

/// A published course with a slug derived from `title`.
pub(crate) fn new_course(teacher: Option<TeacherUuid>, title: &str, price: u64) -> NewCourse {
    NewCourse {
        uuid: CourseUuid::new(),
        category_uuid: None,
        teacher_uuid: teacher,
        title: title.to_string(),
        description: None,
        price,
        language: Language::English,
        level: Level::Beginner,
        platform_status: PlatformStatus::Published,
        teacher_course_status: TeacherCourseStatus::Published,
        featured: false,
        slug: None,
    }
}

pub(crate) async fn create_course(
    ctx: &TestContext,
    teacher: Option<TeacherUuid>,
    title: &str,
    price: u64,
) -> Result<CourseRecord, CatalogServiceError> {
    ctx.catalog
        .create_course(new_course(teacher, title, price))
        .await
}

pub(crate) async fn create_country(
    ctx: &TestContext,
    name: &str,
    tax_rate: u32,
) -> Result<CountryRecord, CatalogServiceError> {
    ctx.catalog
        .create_country(NewCountry {
            uuid: CountryUuid::new(),
            name: name.to_string(),
            tax_rate,
            active: true,
        })
        .await
}

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    course: CourseUuid,
    country: Option<&str>,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(NewCartItem {
            uuid: CartItemUuid::new(),
            user_uuid: user,
            course_uuid: course,
            country: country.map(str::to_string),
        })
        .await
}

pub(crate) async fn checkout(
    ctx: &TestContext,
    student: UserUuid,
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .create_order(NewOrder {
            uuid: OrderUuid::new(),
            student_uuid: student,
            full_name: Some("Test Student".to_string()),
            email: Some("student@example.com".to_string()),
            country: None,
        })
        .await
}

/// An active coupon.
pub(crate) async fn create_coupon(
    ctx: &TestContext,
    teacher: Option<TeacherUuid>,
    code: &str,
    discount: u32,
) -> Result<CouponRecord, CouponsServiceError> {
    ctx.coupons
        .create_coupon(NewCoupon {
            uuid: CouponUuid::new(),
            teacher_uuid: teacher,
            code: code.to_string(),
            discount,
            active: true,
        })
        .await
}
