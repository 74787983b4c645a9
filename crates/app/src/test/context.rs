//! Test context for service-level integration tests.

use crate::{
    database::Db,
    domain::{
        carts::PgCartsService, catalog::PgCatalogService, coupons::PgCouponsService,
        enrollments::PgEnrollmentsService, notifications::PgNotificationsService,
        orders::PgOrdersService, reviews::PgReviewsService,
    },
};

use super::db::TestDb;

/// Every service wired to a fresh, migrated database.
pub(crate) struct TestContext {
    /// Keeps the database alive until the test finishes.
    pub(crate) db: TestDb,
    pub(crate) catalog: PgCatalogService,
    pub(crate) carts: PgCartsService,
    pub(crate) coupons: PgCouponsService,
    pub(crate) orders: PgOrdersService,
    pub(crate) enrollments: PgEnrollmentsService,
    pub(crate) notifications: PgNotificationsService,
    pub(crate) reviews: PgReviewsService,
}

impl TestContext {
    pub(crate) async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            catalog: PgCatalogService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            coupons: PgCouponsService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            enrollments: PgEnrollmentsService::new(db.clone()),
            notifications: PgNotificationsService::new(db.clone()),
            reviews: PgReviewsService::new(db),
            db: test_db,
        }
    }
}
