//! Carts service.

use async_trait::async_trait;
use lectern::pricing::price_line;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartItemUuid, CartStats},
            repositories::PgCartItemsRepository,
        },
        catalog::repositories::{PgCountriesRepository, PgCoursesRepository},
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
    courses_repository: PgCoursesRepository,
    countries_repository: PgCountriesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
            courses_repository: PgCoursesRepository::new(),
            countries_repository: PgCountriesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %item.user_uuid,
            course_uuid = %item.course_uuid,
            country = item.country.as_deref(),
        ),
        err
    )]
    async fn add_item(&self, item: NewCartItem) -> Result<CartItemRecord, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let course = self
            .courses_repository
            .get_course(&mut tx, item.course_uuid)
            .await?;

        let tax_rate = match item.country.as_deref() {
            Some(name) => self
                .countries_repository
                .find_country(&mut tx, name)
                .await?
                .map_or(0, |country| country.tax_rate),
            None => 0,
        };

        debug!(price = course.price, tax_rate, "pricing cart item");

        let line = price_line(course.price, tax_rate)?;

        let created = self
            .items_repository
            .upsert_cart_item(&mut tx, item, line)
            .await?;

        tx.commit().await?;

        info!(
            cart_item_uuid = %created.uuid,
            total = created.total,
            "added course to cart"
        );

        Ok(created)
    }

    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let items = self.items_repository.list_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        Ok(items)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(user_uuid = %user, cart_item_uuid = %item),
        err
    )]
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!("removed cart item");

        Ok(())
    }

    async fn get_stats(&self, user: UserUuid) -> Result<CartStats, CartsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let stats = self.items_repository.cart_stats(&mut tx, user).await?;

        tx.commit().await?;

        Ok(stats)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Adds a course to a user's cart, taxed at the active rate for `item.country`.
    ///
    /// Countries without an active record are taxed at zero. Adding a course that is
    /// already in the cart reprices the existing row.
    async fn add_item(&self, item: NewCartItem) -> Result<CartItemRecord, CartsServiceError>;

    /// A user's cart, oldest first.
    async fn list_items(&self, user: UserUuid) -> Result<Vec<CartItemRecord>, CartsServiceError>;

    /// Removes one of the user's cart items.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid) -> Result<(), CartsServiceError>;

    /// Item count and summed amounts across the user's cart.
    async fn get_stats(&self, user: UserUuid) -> Result<CartStats, CartsServiceError>;
}
