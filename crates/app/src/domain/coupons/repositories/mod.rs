//! Coupon Repositories

mod coupons;

pub(crate) use coupons::PgCouponsRepository;
