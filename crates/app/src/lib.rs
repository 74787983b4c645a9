//! Lectern application services: catalog, carts, coupons, orders and the enrollment
//! fan-out, persisted in `PostgreSQL`.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;

pub mod uuids;
