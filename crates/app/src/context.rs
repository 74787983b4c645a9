//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        coupons::{CouponsService, PgCouponsService},
        enrollments::{EnrollmentsService, PgEnrollmentsService},
        notifications::{NotificationsService, PgNotificationsService},
        orders::{OrdersService, PgOrdersService},
        reviews::{PgReviewsService, ReviewsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub enrollments: Arc<dyn EnrollmentsService>,
    pub notifications: Arc<dyn NotificationsService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl AppContext {
    /// Wire every service to the same database.
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            enrollments: Arc::new(PgEnrollmentsService::new(db.clone())),
            notifications: Arc::new(PgNotificationsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
        }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::new(&Db::new(pool)))
    }
}
