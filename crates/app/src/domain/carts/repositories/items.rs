//! Cart Items Repository

use lectern::pricing::LinePrice;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    carts::{
        data::NewCartItem,
        records::{CartItemRecord, CartItemUuid, CartStats},
    },
    columns::{amount_param, try_get_amount, try_get_timestamp, try_get_uuid},
    users::UserUuid,
};

const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CART_STATS_SQL: &str = include_str!("../sql/cart_stats.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Inserts the item, or reprices the user's existing row for the same course.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewCartItem,
        line: LinePrice,
    ) -> Result<CartItemRecord, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(UPSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.user_uuid.into_uuid())
            .bind(item.course_uuid.into_uuid())
            .bind(amount_param(line.price, "price")?)
            .bind(amount_param(line.tax_fee, "tax_fee")?)
            .bind(amount_param(line.total, "total")?)
            .bind(item.country)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Postgres, CartItemRecord>(LIST_CART_ITEMS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn cart_stats(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CartStats, sqlx::Error> {
        let row = query(CART_STATS_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartStats {
            items: try_get_amount(&row, "items")?,
            price: try_get_amount(&row, "price")?,
            tax_fee: try_get_amount(&row, "tax_fee")?,
            total: try_get_amount(&row, "total")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: try_get_uuid(row, "uuid")?,
            user_uuid: try_get_uuid(row, "user_uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            price: try_get_amount(row, "price")?,
            tax_fee: try_get_amount(row, "tax_fee")?,
            total: try_get_amount(row, "total")?,
            country: row.try_get("country")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
