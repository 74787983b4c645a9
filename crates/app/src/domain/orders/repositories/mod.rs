//! Order Repositories

mod checkout;
mod items;
mod orders;

pub(crate) use checkout::PgCheckoutRepository;
pub(crate) use items::PgOrderItemsRepository;
pub(crate) use orders::PgOrdersRepository;
