//! Orders service.

use async_trait::async_trait;
use lectern::orders::{OrderLine, OrderTotals};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::NewOrder,
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repositories::{PgCheckoutRepository, PgOrderItemsRepository, PgOrdersRepository},
        },
        users::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    checkout_repository: PgCheckoutRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            checkout_repository: PgCheckoutRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, order),
        fields(order_uuid = %order.uuid, student_uuid = %order.student_uuid),
        err
    )]
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self
            .checkout_repository
            .lock_cart_lines(&mut tx, order.student_uuid)
            .await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let lines: Vec<OrderLine> = cart
            .iter()
            .map(|checkout| OrderLine::new(checkout.line))
            .collect();

        let totals = OrderTotals::from_lines(lines.iter().copied())?;

        let student = order.student_uuid;
        let created = self
            .orders_repository
            .create_order(&mut tx, order, totals)
            .await?;

        for (checkout, line) in cart.iter().zip(lines) {
            self.items_repository
                .create_order_item(
                    &mut tx,
                    created.uuid,
                    checkout.course_uuid,
                    checkout.teacher_uuid,
                    line,
                )
                .await?;

            if let Some(teacher) = checkout.teacher_uuid {
                self.orders_repository
                    .add_teacher(&mut tx, created.uuid, teacher)
                    .await?;
            }
        }

        let cleared = self
            .checkout_repository
            .clear_cart(&mut tx, student, &cart)
            .await?;

        if cleared != cart.len() as u64 {
            return Err(OrdersServiceError::CartChanged);
        }

        let created = self.orders_repository.get_order(&mut tx, created.uuid).await?;

        created.totals().verify(created.lines())?;

        tx.commit().await?;

        info!(
            order_uuid = %created.uuid,
            items = created.items.len(),
            total = created.total,
            "created order from cart"
        );

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let order = self.orders_repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, student: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let orders = self
            .orders_repository
            .list_student_orders(&mut tx, student)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.fail_payment",
        skip(self),
        fields(order_uuid = %order),
        err
    )]
    async fn fail_payment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let locked = self.orders_repository.lock_order(&mut tx, order).await?;

        let status = locked.payment_status.fail()?;

        self.orders_repository
            .set_payment_status(&mut tx, order, status, None)
            .await?;

        let updated = self.orders_repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(payment_status = %updated.payment_status, "recorded failed payment");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Checks out the student's cart into a new order and empties the cart.
    ///
    /// The order carries one item per cart row, undiscounted, with aggregate totals
    /// summed from the items.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order with its items.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// A student's orders, newest first.
    async fn list_orders(&self, student: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Records a failed payment. Paid orders cannot fail.
    async fn fail_payment(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;
}
