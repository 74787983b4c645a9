//! Checkout Repository
//!
//! Reads and clears the cart rows an order is built from.

use lectern::pricing::LinePrice;
use sqlx::{FromRow, Postgres, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    carts::records::CartItemUuid,
    catalog::records::{CourseUuid, TeacherUuid},
    columns::{try_get_amount, try_get_optional_uuid, try_get_uuid},
    users::UserUuid,
};

const LOCK_CART_LINES_SQL: &str = include_str!("../sql/lock_cart_lines.sql");
const CLEAR_CART_SQL: &str = include_str!("../sql/clear_cart.sql");

/// A cart row joined with the teacher of its course.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CheckoutLine {
    pub(crate) cart_item_uuid: CartItemUuid,
    pub(crate) course_uuid: CourseUuid,
    pub(crate) teacher_uuid: Option<TeacherUuid>,
    pub(crate) line: LinePrice,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCheckoutRepository;

impl PgCheckoutRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Locks the user's cart rows until the transaction ends.
    pub(crate) async fn lock_cart_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<CheckoutLine>, sqlx::Error> {
        query_as::<Postgres, CheckoutLine>(LOCK_CART_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Deletes the checked-out rows only; rows added since they were locked stay in the cart.
    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        lines: &[CheckoutLine],
    ) -> Result<u64, sqlx::Error> {
        let items: Vec<Uuid> = lines
            .iter()
            .map(|line| line.cart_item_uuid.into_uuid())
            .collect();

        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .bind(items)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CheckoutLine {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            cart_item_uuid: try_get_uuid(row, "uuid")?,
            course_uuid: try_get_uuid(row, "course_uuid")?,
            teacher_uuid: try_get_optional_uuid(row, "teacher_uuid")?,
            line: LinePrice {
                price: try_get_amount(row, "price")?,
                tax_fee: try_get_amount(row, "tax_fee")?,
                total: try_get_amount(row, "total")?,
            },
        })
    }
}
